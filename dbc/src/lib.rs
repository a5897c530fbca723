/*!
Deterministic generation of DBC files from an in-memory CAN network description.

```
use canconv_dbc::prelude::*;

let network = Network::new("1.0")
    .add_node("ECU1", Node::new())
    .add_message(
        "Status",
        Message::new(100, 8)
            .sender("ECU1")
            .add_signal("Flag", Signal::new(0, 1).range(0.0, 1.0)),
    );

let dbc = Generator::new().render(&network).unwrap();
assert!(dbc.contains("BO_ 100 Status: 8 ECU1\n SG_ Flag : 0|1@0+ (1,0) [0|1] \"\" Vector__XXX\n"));
```
*/

use tracing::*;

mod commit;
mod error;
mod generate;
mod model;
mod sink;
mod validate;

pub mod format;
pub mod symbols;

pub use error::Error;

pub mod prelude {
    pub use super::error::Error;
    pub use super::format::StringPolicy;
    pub use super::generate::Generator;
    pub use super::model::{ByteOrder, Message, MuxRole, Network, Node, Signal};
    pub use super::sink::{LineWriter, Sink};
}

use prelude::*;

#[cfg(test)]
mod format_tests;
