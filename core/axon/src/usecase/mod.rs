//! UseCase 層

pub mod dispatch;

pub use dispatch::{Action, DispatchDeps, DispatchRequest, DispatchUseCase};
