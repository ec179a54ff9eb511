pub mod booking;
pub mod hall;
pub mod movie;
pub mod seat;
pub mod show;
pub mod theater;
pub mod user;
