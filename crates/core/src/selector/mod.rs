// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selector and decorator commands: conditional, select, deferred, proxy

pub mod conditional;
pub mod deferred;
pub mod proxy;
pub mod select;

pub use conditional::ConditionalCommand;
pub use deferred::DeferredCommand;
pub use proxy::ProxyCommand;
pub use select::SelectCommand;
