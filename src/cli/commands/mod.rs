pub mod backup;
pub mod config;
pub mod db;
pub mod export;
pub mod init;
pub mod log;
pub mod publish;
pub mod roster;
pub mod schedule;
pub mod shift_type;
pub mod staff;
pub mod ward;
