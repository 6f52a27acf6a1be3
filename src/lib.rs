#![no_std]

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]

pub mod config;
pub mod monitor;
pub mod radio;
