// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod chart;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fx;
pub mod ledger;
pub mod log;
pub mod models;
pub mod paths;
pub mod report;
pub mod session;
pub mod utils;

pub use error::SpendError;
pub use session::Session;
