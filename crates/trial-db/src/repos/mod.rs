//! Repository modules adding queries to `TrialDb` via `impl TrialDb` blocks.

pub mod trial;
