// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Claim check API endpoints
//!
//! `POST /v1/check`, `GET /v1/check/:id` and `GET /v1/check/:id/accuracy`.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{accuracy_handler, check_handler, get_check_handler};
pub use request::CheckApiRequest;
pub use response::CheckApiResponse;
