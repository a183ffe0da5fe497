// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Tri-state results for capability queries.
//!
//! Boolean-returning, last-error-style PKI APIs collapse "no data" and "call
//! failed" into one signal. Capability methods instead return
//! `Result<Lookup<T>>` so the two stay apart: only the `Err` branch aborts a
//! validation call, while `NotFound` is ordinary data (an absent extension,
//! a certificate that is not in the store).

/// Outcome of a capability query that can legitimately find nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Lookup::Found(value) => value,
            Lookup::NotFound => default,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}
