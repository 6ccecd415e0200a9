pub mod numeric;
pub mod written;
