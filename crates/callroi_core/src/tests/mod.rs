//! Integration tests for the callroi engine
//!
//! Tests are organized by topic:
//! - `projection` - Yearly projector invariants
//! - `payback` - Monthly payback simulation
//! - `sensitivity` - Tornado and scenario analysis
//! - `formula` - Formula evaluator behaviour
//! - `resolver` - Multi-pass formula resolution
//! - `calculator` - Built-in calculator templates
//! - `end_to_end` - Full calculation on a reference deal

mod formula;
mod payback;
mod resolver;
mod sensitivity;
