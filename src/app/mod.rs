// Application layer: one entry point per CLI subcommand, wired to a Storage.

pub mod commands;
