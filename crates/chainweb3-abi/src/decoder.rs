//! `AbiLogDecoder` — matches logs to ABI events by selector and decodes them.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::{Event, JsonAbi};
use alloy_primitives::B256;
use chainweb3_core::{DecodeError, DecodedValue, Log};
use std::collections::{HashMap, HashSet};

use crate::normalizer;

/// The outcome of decoding one log: event name plus named parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog {
    pub event_name: String,
    pub params: HashMap<String, DecodedValue>,
}

/// The ABI-decoding seam used by event parsers.
///
/// Returns `Ok(None)` for a log that doesn't correspond to any known event.
/// Errors are reserved for a malformed ABI.
pub trait LogDecoder: Send + Sync {
    fn decode_log(&self, log: &Log) -> Result<Option<DecodedLog>, DecodeError>;
}

#[derive(Debug, Clone)]
struct ResolvedParam {
    name: String,
    ty: DynSolType,
    indexed: bool,
}

#[derive(Debug, Clone)]
struct ResolvedEvent {
    name: String,
    params: Vec<ResolvedParam>,
    indexed_count: usize,
    body: DynSolType,
}

impl ResolvedEvent {
    fn resolve(event: &Event) -> Result<Self, DecodeError> {
        let mut params = Vec::with_capacity(event.inputs.len());
        let mut seen = HashSet::new();
        for (position, input) in event.inputs.iter().enumerate() {
            // unnamed parameters are keyed by position
            let name = if input.name.is_empty() {
                position.to_string()
            } else {
                input.name.clone()
            };
            if !seen.insert(name.clone()) {
                return Err(DecodeError::InvalidAbi {
                    reason: format!("event {} declares parameter '{name}' twice", event.name),
                });
            }
            let ty: DynSolType = input.resolve().map_err(|e| DecodeError::InvalidAbi {
                reason: format!("event {} parameter '{name}': {e}", event.name),
            })?;
            params.push(ResolvedParam {
                name,
                ty,
                indexed: input.indexed,
            });
        }

        let indexed_count = params.iter().filter(|p| p.indexed).count();
        let body = DynSolType::Tuple(
            params
                .iter()
                .filter(|p| !p.indexed)
                .map(|p| p.ty.clone())
                .collect(),
        );

        Ok(Self {
            name: event.name.clone(),
            params,
            indexed_count,
            body,
        })
    }

    /// `None` when the log's layout doesn't fit this event.
    fn decode(&self, log: &Log) -> Option<DecodedLog> {
        if log.topics.len() != self.indexed_count + 1 {
            tracing::debug!(
                event = %self.name,
                topics = log.topics.len(),
                expected = self.indexed_count + 1,
                "selector matched but topic count differs"
            );
            return None;
        }

        let mut body = match self.body.abi_decode_params(&log.data) {
            Ok(DynSolValue::Tuple(values)) => values.into_iter(),
            Ok(other) => vec![other].into_iter(),
            Err(e) => {
                tracing::debug!(event = %self.name, error = %e, "log data does not decode");
                return None;
            }
        };
        let mut topics = log.topics.iter().skip(1);

        let mut out = HashMap::with_capacity(self.params.len());
        for param in &self.params {
            let value = if param.indexed {
                decode_topic(topics.next()?, &param.ty)?
            } else {
                normalizer::normalize(body.next()?)
            };
            out.insert(param.name.clone(), value);
        }

        Some(DecodedLog {
            event_name: self.name.clone(),
            params: out,
        })
    }
}

/// Decode one indexed topic.
///
/// Value types are stored ABI-encoded and recoverable. Reference types
/// (string, bytes, arrays, tuples) are stored as the keccak256 of their
/// encoding; the original value is lost, so the raw 32-byte hash is returned.
fn decode_topic(topic: &B256, ty: &DynSolType) -> Option<DecodedValue> {
    let is_value_type = matches!(
        ty,
        DynSolType::Bool
            | DynSolType::Int(_)
            | DynSolType::Uint(_)
            | DynSolType::FixedBytes(_)
            | DynSolType::Address
            | DynSolType::Function
    );
    if !is_value_type {
        return Some(DecodedValue::Bytes(topic.to_vec()));
    }
    match ty.abi_decode(topic.as_slice()) {
        Ok(v) => Some(normalizer::normalize(v)),
        Err(e) => {
            tracing::debug!(ty = %ty.sol_type_name(), error = %e, "indexed topic does not decode");
            None
        }
    }
}

/// Decodes logs against every non-anonymous event of one contract ABI.
///
/// The ABI is resolved once at construction; decoding is then lock-free and
/// the decoder can be shared across tasks.
#[derive(Debug, Clone, Default)]
pub struct AbiLogDecoder {
    /// Events sharing a selector differ only in which params are indexed
    /// (ERC-20 vs ERC-721 `Transfer`); each layout is tried in ABI order.
    events: HashMap<B256, Vec<ResolvedEvent>>,
}

impl AbiLogDecoder {
    /// Build from a parsed ABI.
    ///
    /// # Errors
    /// [`DecodeError::InvalidAbi`] if a parameter type cannot be resolved or a
    /// parameter name repeats within one event.
    pub fn new(abi: &JsonAbi) -> Result<Self, DecodeError> {
        Self::from_events(abi.events())
    }

    /// Build from the JSON ABI text emitted by solc.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let abi: JsonAbi = serde_json::from_str(json)?;
        Self::new(&abi)
    }

    /// Build from human-readable signatures, e.g.
    /// `"event Transfer(address indexed from, address indexed to, uint256 value)"`.
    pub fn from_signatures<S: AsRef<str>>(signatures: &[S]) -> Result<Self, DecodeError> {
        let events = signatures
            .iter()
            .map(|s| {
                Event::parse(s.as_ref()).map_err(|e| DecodeError::InvalidAbi {
                    reason: format!("'{}': {e}", s.as_ref()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_events(events.iter())
    }

    fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Result<Self, DecodeError> {
        let mut resolved = HashMap::new();
        for event in events {
            // anonymous events carry no selector topic
            if event.anonymous {
                continue;
            }
            resolved
                .entry(event.selector())
                .or_insert_with(Vec::new)
                .push(ResolvedEvent::resolve(event)?);
        }
        Ok(Self { events: resolved })
    }

    /// Returns `true` if `selector` belongs to a known event.
    pub fn knows(&self, selector: &B256) -> bool {
        self.events.contains_key(selector)
    }

    /// Names of the known events, unordered.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.values().flatten().map(|e| e.name.as_str())
    }

    /// Number of event layouts, counting each indexed variant of a selector.
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl LogDecoder for AbiLogDecoder {
    fn decode_log(&self, log: &Log) -> Result<Option<DecodedLog>, DecodeError> {
        let Some(layouts) = log.selector().and_then(|s| self.events.get(s)) else {
            return Ok(None);
        };
        Ok(layouts.iter().find_map(|event| event.decode(log)))
    }
}
