pub mod status_message;
