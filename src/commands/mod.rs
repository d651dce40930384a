pub mod extract;
pub mod lookup;
pub mod register;
pub mod status;
