/*!
The error type for the `canconv-dbc` crate.

Structural and encoding errors are reported before any output is produced;
sink errors abort generation and carry the underlying I/O failure.
*/

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A top-level signal claims to be selected by a multiplexor it does not have.
    #[error("Signal {signal} in message {message} is a multiplexed child without a multiplexor")]
    OrphanMuxChild { message: String, signal: String },

    /// A multiplexor owns a child that carries no switch value.
    #[error(
        "Signal {signal} in message {message} is a child of multiplexor {parent} but has no switch value"
    )]
    MissingSwitchValue {
        message: String,
        parent: String,
        signal: String,
    },

    /// Two children of the same multiplexor are selected by the same value.
    #[error(
        "Multiplexor {parent} in message {message} has more than one child with switch value {switch_value}"
    )]
    DuplicateSwitchValue {
        message: String,
        parent: String,
        switch_value: u64,
    },

    #[error("Signal {signal} in message {message} has zero size")]
    EmptySignal { message: String, signal: String },

    #[error("Signal {signal} in message {message} has a non-finite {field}")]
    NonFiniteValue {
        message: String,
        signal: String,
        field: &'static str,
    },

    #[error("Invalid {kind} identifier {name:?}")]
    InvalidIdentifier { kind: &'static str, name: String },

    #[error("Node name {0} is reserved")]
    ReservedNodeName(String),

    #[error("Message {message} references unknown node {node}")]
    UnknownNode { message: String, node: String },

    /// A quoted string cannot be encoded under the active [`StringPolicy`](crate::format::StringPolicy).
    #[error("Cannot encode {field} string {value:?}: {reason}")]
    InvalidString {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// The output destination could not be written.
    #[error("Failed to write DBC output: {0}")]
    Sink(#[from] std::io::Error),
}
