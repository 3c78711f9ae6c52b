pub mod input_validation;
