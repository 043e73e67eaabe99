// This is a stub lib.rs managed by cargo-hakari. Its contents are never
// compiled into anything useful; the package exists to unify features
// across the workspace.
