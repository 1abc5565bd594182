pub mod animation;
pub mod audio;
pub mod body;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod input;
pub mod numerals;
pub mod obstacles;
pub mod runtime;
pub mod score;
pub mod simulation;
