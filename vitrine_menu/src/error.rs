// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors reported by the menu tree and controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The menu description used the same id for two branches.
    #[error("menu structure contains a duplicate branch id")]
    DuplicateId,
    /// An event referred to an id that is not part of the menu.
    #[error("no disclosure branch with the given id")]
    UnknownNode,
}
