pub mod media_handler;
