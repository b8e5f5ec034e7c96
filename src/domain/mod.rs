// Domain layer - Core models independent of transport and scheduling
pub mod outcome;
pub mod source;
pub mod widget;
