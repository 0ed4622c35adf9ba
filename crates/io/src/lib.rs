// File I/O between xlsx workbooks and the engine's value model.

pub mod xlsx;
