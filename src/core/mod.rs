pub mod dispatcher;
pub mod events;
pub mod invoker;
