pub mod silo_handler;
