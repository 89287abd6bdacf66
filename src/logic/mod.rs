// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic that sits behind the MVU kernel: card list storage.

pub mod store;
