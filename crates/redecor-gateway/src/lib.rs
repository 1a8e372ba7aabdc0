// SPDX-FileCopyrightText: 2026 Redecor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the redecor service.
//!
//! Exposes the decoration endpoint over axum with bearer auth, CORS from a
//! configured origin list, an upload size limit, and a typed mapping from
//! the error taxonomy to HTTP status codes.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};
