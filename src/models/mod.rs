pub mod assignment;
pub mod roster;
pub mod schedule;
pub mod shift_type;
pub mod staff;
pub mod ward;
