//! Scenarios running the lifecycle operations against a mocked node.

mod cases;
