/*!
Structural checks run before any output is produced.

These do not attempt semantic validation of the network (ranges, bit overlap);
they refuse only what would render as an inconsistent or unparseable DBC file.
*/

use super::*;
use std::collections::BTreeMap;

/// Checks that `network` can be rendered, with strings encoded under `policy`.
pub fn validate(network: &Network, policy: StringPolicy) -> Result<(), Error> {
    format::format_string("version", &network.version, policy)?;

    for (name, node) in &network.nodes {
        check_identifier("node", name)?;
        if name == symbols::NO_NODE {
            return Err(Error::ReservedNodeName(name.clone()));
        }
        if let Some(description) = &node.description {
            format::format_string("node description", description, policy)?;
        }
    }

    for (name, message) in &network.messages {
        check_identifier("message", name)?;
        if let Some(description) = &message.description {
            format::format_string("message description", description, policy)?;
        }
        if let Some(sender) = &message.sender {
            check_node(network, name, sender)?;
        }

        for (signal_name, signal) in &message.signals {
            if signal.switch_value().is_some() {
                return Err(Error::OrphanMuxChild {
                    message: name.clone(),
                    signal: signal_name.clone(),
                });
            }
            check_signal(network, policy, name, signal_name, signal)?;
        }
    }
    Ok(())
}

fn check_signal(
    network: &Network,
    policy: StringPolicy,
    message: &str,
    name: &str,
    signal: &Signal,
) -> Result<(), Error> {
    check_identifier("signal", name)?;

    if signal.size == 0 {
        return Err(Error::EmptySignal {
            message: message.into(),
            signal: name.into(),
        });
    }

    for (field, value) in [
        ("scale", signal.scale),
        ("offset", signal.offset),
        ("minimum", signal.min),
        ("maximum", signal.max),
    ] {
        if !value.is_finite() {
            return Err(Error::NonFiniteValue {
                message: message.into(),
                signal: name.into(),
                field,
            });
        }
    }

    format::format_string("unit", &signal.unit, policy)?;
    if let Some(description) = &signal.description {
        format::format_string("signal description", description, policy)?;
    }
    if let Some(bitmap) = &signal.bitmap {
        for label in bitmap.values() {
            format::format_string("value label", label, policy)?;
        }
    }
    for receiver in &signal.receivers {
        check_node(network, message, receiver)?;
    }

    if let Some(children) = signal.children() {
        let mut seen = BTreeMap::new();
        for (child_name, child) in children {
            let Some(switch_value) = child.switch_value() else {
                return Err(Error::MissingSwitchValue {
                    message: message.into(),
                    parent: name.into(),
                    signal: child_name.clone(),
                });
            };
            if seen.insert(switch_value, child_name).is_some() {
                return Err(Error::DuplicateSwitchValue {
                    message: message.into(),
                    parent: name.into(),
                    switch_value,
                });
            }
            check_signal(network, policy, message, child_name, child)?;
        }
    }
    Ok(())
}

fn check_node(network: &Network, message: &str, node: &str) -> Result<(), Error> {
    check_identifier("node", node)?;
    if !network.nodes.contains_key(node) {
        return Err(Error::UnknownNode {
            message: message.into(),
            node: node.into(),
        });
    }
    Ok(())
}

/// DBC names are C identifiers.
fn check_identifier(kind: &'static str, name: &str) -> Result<(), Error> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            kind,
            name: name.into(),
        })
    }
}
