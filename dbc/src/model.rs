/*!
The in-memory CAN network description rendered by the generator.

Every collection is keyed by name in a `BTreeMap`, so iterating the model is
always lexicographic and generation is reproducible byte-for-byte.
*/

use std::collections::BTreeMap;

/// A complete CAN network: the bus participants and the frames they exchange.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Network {
    pub version: String,
    pub nodes: BTreeMap<String, Node>,
    pub messages: BTreeMap<String, Message>,
}

impl Network {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn add_node(mut self, name: impl Into<String>, node: Node) -> Self {
        self.nodes.insert(name.into(), node);
        self
    }

    pub fn add_message(mut self, name: impl Into<String>, message: Message) -> Self {
        self.messages.insert(name.into(), message);
        self
    }

    /// Total number of signals across all messages, at every multiplexing depth.
    pub fn signal_count(&self) -> usize {
        self.messages.values().map(Message::signal_count).sum()
    }
}

/// A bus participant (ECU).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Node {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_description(&self) -> bool {
        non_empty(&self.description)
    }
}

/// A CAN frame definition.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Message {
    pub id: u32,
    /// Payload length in bytes.
    pub length: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sender: Option<String>,
    /// The top-level signals; multiplexed children live inside their multiplexor.
    pub signals: BTreeMap<String, Signal>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl Message {
    pub fn new(id: u32, length: u32) -> Self {
        Self {
            id,
            length,
            ..Default::default()
        }
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_signal(mut self, name: impl Into<String>, signal: Signal) -> Self {
        self.signals.insert(name.into(), signal);
        self
    }

    pub fn has_description(&self) -> bool {
        non_empty(&self.description)
    }

    /// Number of signals in this message, including every nested multiplexed child.
    pub fn signal_count(&self) -> usize {
        self.signals.values().map(Signal::tree_size).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// The part a signal plays in a multiplexed message.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MuxRole {
    /// Always present in the frame.
    #[default]
    None,
    /// Present only when the parent multiplexor holds `switch_value`.
    Child { switch_value: u64 },
    /// Selects which of `children` are present.
    Multiplexor { children: BTreeMap<String, Signal> },
    /// Selected by its parent, and itself selects among `children`.
    ChildAndMultiplexor {
        switch_value: u64,
        children: BTreeMap<String, Signal>,
    },
}

/// A bit-field within a message payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Signal {
    pub start_bit: u32,
    pub size: u32,
    pub byte_order: ByteOrder,
    pub signed: bool,
    pub scale: f64,
    pub offset: f64,
    pub min: f64,
    pub max: f64,
    pub unit: String,
    pub receivers: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub bitmap: Option<BTreeMap<u64, String>>,
    pub mux: MuxRole,
}

impl Default for Signal {
    fn default() -> Self {
        Self {
            start_bit: 0,
            size: 0,
            byte_order: ByteOrder::default(),
            signed: false,
            scale: 1.0,
            offset: 0.0,
            min: 0.0,
            max: 0.0,
            unit: String::new(),
            receivers: Vec::new(),
            description: None,
            bitmap: None,
            mux: MuxRole::None,
        }
    }
}

impl Signal {
    pub fn new(start_bit: u32, size: u32) -> Self {
        Self {
            start_bit,
            size,
            ..Default::default()
        }
    }

    pub fn big_endian(mut self) -> Self {
        self.byte_order = ByteOrder::Big;
        self
    }

    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub fn scaling(mut self, scale: f64, offset: f64) -> Self {
        self.scale = scale;
        self.offset = offset;
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receivers.push(receiver.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn bitmap_entry(mut self, value: u64, label: impl Into<String>) -> Self {
        self.bitmap
            .get_or_insert_with(BTreeMap::new)
            .insert(value, label.into());
        self
    }

    /// Marks this signal as selected by its parent multiplexor when it holds `switch_value`.
    pub fn child_of(mut self, switch_value: u64) -> Self {
        self.mux = match std::mem::take(&mut self.mux) {
            MuxRole::Multiplexor { children }
            | MuxRole::ChildAndMultiplexor { children, .. } => MuxRole::ChildAndMultiplexor {
                switch_value,
                children,
            },
            MuxRole::None | MuxRole::Child { .. } => MuxRole::Child { switch_value },
        };
        self
    }

    /// Adds a multiplexed child, turning this signal into a multiplexor.
    pub fn add_child(mut self, name: impl Into<String>, child: Signal) -> Self {
        let (switch_value, mut children) = match std::mem::take(&mut self.mux) {
            MuxRole::None => (None, BTreeMap::new()),
            MuxRole::Child { switch_value } => (Some(switch_value), BTreeMap::new()),
            MuxRole::Multiplexor { children } => (None, children),
            MuxRole::ChildAndMultiplexor {
                switch_value,
                children,
            } => (Some(switch_value), children),
        };
        children.insert(name.into(), child);
        self.mux = match switch_value {
            Some(switch_value) => MuxRole::ChildAndMultiplexor {
                switch_value,
                children,
            },
            None => MuxRole::Multiplexor { children },
        };
        self
    }

    /// The value of the parent multiplexor that selects this signal, if it is a child.
    pub fn switch_value(&self) -> Option<u64> {
        match self.mux {
            MuxRole::Child { switch_value } | MuxRole::ChildAndMultiplexor { switch_value, .. } => {
                Some(switch_value)
            }
            MuxRole::None | MuxRole::Multiplexor { .. } => None,
        }
    }

    /// The signals this multiplexor selects among, if it is one.
    pub fn children(&self) -> Option<&BTreeMap<String, Signal>> {
        match &self.mux {
            MuxRole::Multiplexor { children } | MuxRole::ChildAndMultiplexor { children, .. } => {
                Some(children)
            }
            MuxRole::None | MuxRole::Child { .. } => None,
        }
    }

    pub fn is_multiplexor(&self) -> bool {
        self.children().is_some()
    }

    pub fn is_bitmap(&self) -> bool {
        self.bitmap.as_ref().is_some_and(|b| !b.is_empty())
    }

    pub fn has_description(&self) -> bool {
        non_empty(&self.description)
    }

    fn tree_size(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |c| c.values().map(Signal::tree_size).sum())
    }
}

fn non_empty(s: &Option<String>) -> bool {
    s.as_deref().is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mux_roles() {
        let s = Signal::new(0, 4).child_of(3);
        assert_eq!(s.mux, MuxRole::Child { switch_value: 3 });
        assert!(!s.is_multiplexor());

        // Order of child_of/add_child does not matter
        let a = Signal::new(0, 4)
            .child_of(3)
            .add_child("X", Signal::new(4, 4).child_of(0));
        let b = Signal::new(0, 4)
            .add_child("X", Signal::new(4, 4).child_of(0))
            .child_of(3);
        assert_eq!(a, b);
        assert_eq!(a.switch_value(), Some(3));
        assert_eq!(a.children().map(BTreeMap::len), Some(1));
        assert!(matches!(a.mux, MuxRole::ChildAndMultiplexor { .. }));

        let m = Signal::new(0, 4).add_child("X", Signal::new(4, 4).child_of(0));
        assert_eq!(m.switch_value(), None);
        assert!(m.is_multiplexor());
    }

    #[test]
    fn counts() {
        let message = Message::new(1, 8)
            .add_signal("A", Signal::new(0, 1))
            .add_signal(
                "M",
                Signal::new(1, 2)
                    .add_child("B", Signal::new(3, 1).child_of(0))
                    .add_child(
                        "C",
                        Signal::new(3, 1)
                            .child_of(1)
                            .add_child("D", Signal::new(4, 1).child_of(1)),
                    ),
            );
        assert_eq!(message.signal_count(), 5);
        assert_eq!(
            Network::new("")
                .add_message("One", message.clone())
                .add_message("Two", message)
                .signal_count(),
            10
        );
    }

    #[test]
    fn descriptions() {
        assert!(!Node::new().has_description());
        assert!(!Node::new().description("").has_description());
        assert!(Node::new().description("ECU").has_description());
        assert!(!Signal::new(0, 1).is_bitmap());
        assert!(Signal::new(0, 1).bitmap_entry(0, "OFF").is_bitmap());
    }

    #[test]
    fn from_json() {
        let network: Network = serde_json::from_str(
            r#"{
                "version": "1.0",
                "nodes": { "ECU1": { "description": "Engine" } },
                "messages": {
                    "Status": {
                        "id": 100,
                        "length": 8,
                        "sender": "ECU1",
                        "signals": {
                            "Mode": {
                                "start_bit": 0,
                                "size": 2,
                                "byte_order": "big",
                                "bitmap": { "0": "OFF", "1": "ON" },
                                "mux": {
                                    "multiplexor": {
                                        "children": {
                                            "Speed": {
                                                "start_bit": 2,
                                                "size": 6,
                                                "bitmap": { "3": "MAX" },
                                                "mux": { "child": { "switch_value": 1 } }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let expected = Network::new("1.0")
            .add_node("ECU1", Node::new().description("Engine"))
            .add_message(
                "Status",
                Message::new(100, 8).sender("ECU1").add_signal(
                    "Mode",
                    Signal::new(0, 2)
                        .big_endian()
                        .bitmap_entry(0, "OFF")
                        .bitmap_entry(1, "ON")
                        .add_child(
                            "Speed",
                            Signal::new(2, 6).child_of(1).bitmap_entry(3, "MAX"),
                        ),
                ),
            );
        assert_eq!(network, expected);

        let json = serde_json::to_string(&expected).unwrap();
        assert_eq!(serde_json::from_str::<Network>(&json).unwrap(), expected);
    }
}
