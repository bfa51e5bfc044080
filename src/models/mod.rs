pub mod booking;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingDetail, BookingDraft, BookingFields};
pub use room::{NewRoom, Room, RoomDetails};
pub use user::{NewUser, User, UserDetails};
