pub mod api;
pub mod board;
pub mod busy;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod modal;
pub mod notice;
pub mod reconcile;
pub mod task;
pub mod theme;

pub use api::TaskApi;
pub use board::{
  Board,
  Card,
  Lane
};
pub use controller::{
  Controller,
  Notifier
};
pub use error::{
  ApiError,
  BoardError
};
pub use lanes_shared::{
  Column,
  ListId,
  Progress,
  TaskId
};
