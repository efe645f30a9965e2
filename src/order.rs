use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

pub type OrderId = Arc<str>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub destination: Arc<str>,
}

#[derive(Debug, Error)]
pub enum OrderLoadError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// What the shell gets back from a lenient load: never a hard failure.
#[derive(Debug)]
pub struct LoadOutcome {
    pub orders: Vec<Order>,
    pub error: Option<OrderLoadError>,
}

/// Body of a single order. Field names match case-insensitively.
struct OrderBody {
    destination: Arc<str>,
}

impl<'de> Deserialize<'de> for OrderBody {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BodyVisitor;

        impl<'de> Visitor<'de> for BodyVisitor {
            type Value = OrderBody;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an order object with a destination")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderBody, A::Error> {
                let mut destination = None;
                while let Some(key) = map.next_key::<String>()? {
                    if key.eq_ignore_ascii_case("destination") {
                        destination = Some(map.next_value::<Arc<str>>()?);
                    } else {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
                let destination = destination
                    .ok_or_else(|| <A::Error as de::Error>::missing_field("destination"))?;
                Ok(OrderBody { destination })
            }
        }

        deserializer.deserialize_map(BodyVisitor)
    }
}

/// Orders in the order the document lists them.
pub struct OrderBook(pub Vec<Order>);

impl<'de> Deserialize<'de> for OrderBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BookVisitor;

        impl<'de> Visitor<'de> for BookVisitor {
            type Value = OrderBook;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping order ids to orders")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderBook, A::Error> {
                let hint = map.size_hint().unwrap_or(0);
                let mut orders: Vec<Order> = Vec::with_capacity(hint);
                let mut positions: HashMap<OrderId, usize> = HashMap::with_capacity(hint);
                while let Some(id) = map.next_key::<OrderId>()? {
                    let body = map.next_value::<OrderBody>()?;
                    // repeated ids keep their first position, last value wins
                    match positions.get(&id) {
                        Some(&idx) => orders[idx].destination = body.destination,
                        None => {
                            positions.insert(id.clone(), orders.len());
                            orders.push(Order {
                                id,
                                destination: body.destination,
                            });
                        }
                    }
                }
                Ok(OrderBook(orders))
            }
        }

        deserializer.deserialize_map(BookVisitor)
    }
}

pub fn load_from_file(path: &Path) -> Result<Vec<Order>, OrderLoadError> {
    let data = std::fs::read_to_string(path).map_err(|source| OrderLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let book: OrderBook = serde_json::from_str(&data).map_err(|source| OrderLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded {} orders from {}", book.0.len(), path.display());
    Ok(book.0)
}

pub fn load_lenient(path: &Path) -> LoadOutcome {
    match load_from_file(path) {
        Ok(orders) => LoadOutcome { orders, error: None },
        Err(err) => {
            log::warn!("{err}");
            LoadOutcome {
                orders: Vec::new(),
                error: Some(err),
            }
        }
    }
}
