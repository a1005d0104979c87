pub mod chat_stream;
pub mod generate;
pub mod session;
