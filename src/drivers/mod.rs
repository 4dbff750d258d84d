pub mod onetouch;
