mod dispatch;

pub use dispatch::Agent;
