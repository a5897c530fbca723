use super::*;
use crate::format::{format_float, format_uint};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Renders a [`Network`] as DBC text.
///
/// Output is a pure function of the model: every collection is visited in
/// name order, and bitmap entries in ascending value order.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    policy: StringPolicy,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string_policy(policy: StringPolicy) -> Self {
        Self { policy }
    }

    /// Runs the structural checks without producing any output.
    pub fn validate(&self, network: &Network) -> Result<(), Error> {
        validate::validate(network, self.policy)
    }

    /// Validates `network`, then streams it into `sink` line by line.
    ///
    /// Nothing is emitted if validation fails, but a sink failure part way
    /// through leaves whatever was already emitted in the sink.
    pub fn generate<S>(&self, network: &Network, sink: &mut S) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        self.validate(network)?;

        debug!(
            nodes = network.nodes.len(),
            messages = network.messages.len(),
            signals = network.signal_count(),
            "Generating DBC"
        );

        sink.emit(&[symbols::VERSION, &self.quote("version", &network.version)?])?;
        for line in symbols::HEADER {
            sink.emit(&[*line])?;
        }

        self.emit_nodes(sink, network)?;
        sink.emit(&[])?;

        for (name, message) in &network.messages {
            self.emit_message(sink, name, message)?;
            sink.emit(&[])?;
        }

        if self.emit_mux_values(sink, network)? > 0 {
            sink.emit(&[])?;
        }
        if self.emit_bitmaps(sink, network)? > 0 {
            sink.emit(&[])?;
        }
        self.emit_comments(sink, network)
    }

    /// Renders `network` into memory.
    pub fn render(&self, network: &Network) -> Result<String, Error> {
        let mut text = String::new();
        self.generate(network, &mut text)?;
        Ok(text)
    }

    /// Renders `network` completely before handing it to `writer` in one write.
    pub fn write_to<W: Write>(&self, network: &Network, mut writer: W) -> Result<(), Error> {
        let text = self.render(network)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Renders `network` and atomically replaces the file at `path` with it.
    ///
    /// If rendering or writing fails, any existing file at `path` is untouched.
    pub fn write_file(&self, network: &Network, path: impl AsRef<Path>) -> Result<(), Error> {
        let text = self.render(network)?;
        commit::write_atomic(path.as_ref(), text.as_bytes())?;
        info!(path = %path.as_ref().display(), "Wrote DBC file");
        Ok(())
    }

    fn quote(&self, field: &'static str, value: &str) -> Result<String, Error> {
        format::format_string(field, value, self.policy)
    }

    fn emit_nodes<S>(&self, sink: &mut S, network: &Network) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        let mut tokens = vec![symbols::NODE_LIST];
        tokens.extend(network.nodes.keys().map(String::as_str));
        sink.emit(&tokens)
    }

    fn emit_message<S>(&self, sink: &mut S, name: &str, message: &Message) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        debug!(name, id = message.id, "Emitting message");

        let header = format!("{name}:");
        sink.emit(&[
            symbols::MESSAGE,
            &format_uint(message.id),
            &header,
            &format_uint(message.length),
            message.sender.as_deref().unwrap_or(symbols::NO_NODE),
        ])?;

        walk(&message.signals, &mut |name, signal| {
            self.emit_signal(&mut *sink, name, signal)
        })
    }

    fn emit_signal<S>(&self, sink: &mut S, name: &str, signal: &Signal) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        let mux_tag = match &signal.mux {
            MuxRole::None => None,
            MuxRole::Child { switch_value } => Some(format!("m{switch_value}")),
            MuxRole::Multiplexor { .. } => Some("M".to_string()),
            MuxRole::ChildAndMultiplexor { switch_value, .. } => Some(format!("m{switch_value}M")),
        };
        let layout = format!(
            "{}|{}@{}{}",
            signal.start_bit,
            signal.size,
            match signal.byte_order {
                ByteOrder::Little => '0',
                ByteOrder::Big => '1',
            },
            if signal.signed { '-' } else { '+' }
        );
        let scaling = format!(
            "({},{})",
            format_float(signal.scale),
            format_float(signal.offset)
        );
        let range = format!("[{}|{}]", format_float(signal.min), format_float(signal.max));
        let unit = self.quote("unit", &signal.unit)?;
        let receivers = receivers(signal);

        let mut tokens = vec!["", symbols::SIGNAL, name];
        if let Some(mux_tag) = &mux_tag {
            tokens.push(mux_tag);
        }
        tokens.extend([
            ":",
            layout.as_str(),
            scaling.as_str(),
            range.as_str(),
            unit.as_str(),
            receivers.as_str(),
        ]);

        trace!(signal = name, "Emitting signal");
        sink.emit(&tokens)
    }

    fn emit_mux_values<S>(&self, sink: &mut S, network: &Network) -> Result<usize, Error>
    where
        S: Sink + ?Sized,
    {
        let mut count = 0;
        for message in network.messages.values() {
            let id = format_uint(message.id);
            for (name, signal) in message.signals.iter().filter(|(_, s)| s.is_multiplexor()) {
                count += emit_mux_children(sink, &id, name, signal)?;
            }
        }
        debug!(count, "Emitted multiplexor values");
        Ok(count)
    }

    fn emit_bitmaps<S>(&self, sink: &mut S, network: &Network) -> Result<usize, Error>
    where
        S: Sink + ?Sized,
    {
        let mut count = 0;
        for message in network.messages.values() {
            let id = format_uint(message.id);
            walk(&message.signals, &mut |name, signal| {
                if !signal.is_bitmap() {
                    return Ok(());
                }

                let entries = signal
                    .bitmap
                    .iter()
                    .flatten()
                    .map(|(value, label)| -> Result<String, Error> {
                        Ok(format!(
                            "{} {}",
                            format_uint(*value),
                            self.quote("value label", label)?
                        ))
                    })
                    .collect::<Result<Vec<_>, Error>>()?;

                let mut tokens = vec![symbols::VALUE, id.as_str(), name];
                tokens.extend(entries.iter().map(String::as_str));
                tokens.push(symbols::END);
                count += 1;
                sink.emit(&tokens)
            })?;
        }
        debug!(count, "Emitted value tables");
        Ok(count)
    }

    fn emit_comments<S>(&self, sink: &mut S, network: &Network) -> Result<(), Error>
    where
        S: Sink + ?Sized,
    {
        for (name, node) in &network.nodes {
            if node.has_description() {
                sink.emit(&[
                    symbols::COMMENT,
                    symbols::NODE,
                    name,
                    &self.quote("node description", description(&node.description))?,
                    symbols::END,
                ])?;
            }
        }

        for message in network.messages.values() {
            let id = format_uint(message.id);
            if message.has_description() {
                sink.emit(&[
                    symbols::COMMENT,
                    symbols::MESSAGE,
                    &id,
                    &self.quote("message description", description(&message.description))?,
                    symbols::END,
                ])?;
            }

            walk(&message.signals, &mut |name, signal| {
                if !signal.has_description() {
                    return Ok(());
                }
                sink.emit(&[
                    symbols::COMMENT,
                    symbols::SIGNAL,
                    &id,
                    name,
                    &self.quote("signal description", description(&signal.description))?,
                    symbols::END,
                ])
            })?;
        }
        Ok(())
    }
}

/// Visits `signals` and every nested multiplexed child, depth-first, each
/// multiplexor before its children.
fn walk<'a, F>(signals: &'a BTreeMap<String, Signal>, f: &mut F) -> Result<(), Error>
where
    F: FnMut(&'a str, &'a Signal) -> Result<(), Error>,
{
    for (name, signal) in signals {
        f(name.as_str(), signal)?;
        if let Some(children) = signal.children() {
            walk(children, f)?;
        }
    }
    Ok(())
}

/// Emits the `SG_MUL_VAL_` entries for the subtree under `parent`.
///
/// A child's own subtree is always complete before the entry naming that child.
fn emit_mux_children<S>(sink: &mut S, id: &str, parent: &str, signal: &Signal) -> Result<usize, Error>
where
    S: Sink + ?Sized,
{
    let Some(children) = signal.children() else {
        return Ok(0);
    };

    let mut count = 0;
    for (name, child) in children {
        count += emit_mux_children(sink, id, name, child)?;

        if let Some(switch_value) = child.switch_value() {
            let range = format!("{switch_value}-{switch_value}");
            sink.emit(&[symbols::MUX_VALUE, id, name, parent, &range, symbols::END])?;
            count += 1;
        }
    }
    Ok(count)
}

fn description(description: &Option<String>) -> &str {
    description.as_deref().unwrap_or_default()
}

/// Sorted, comma-joined receivers, or the placeholder node when there are none.
fn receivers(signal: &Signal) -> String {
    if signal.receivers.is_empty() {
        return symbols::NO_NODE.to_string();
    }
    let mut receivers: Vec<&str> = signal.receivers.iter().map(String::as_str).collect();
    receivers.sort_unstable();
    receivers.dedup();
    receivers.join(",")
}
