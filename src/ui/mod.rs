pub mod bar;
pub mod emonitor;
