pub mod form;
pub mod markup;
