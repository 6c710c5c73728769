use finance::coin::Amount;
use sdk::cosmwasm_std::{Addr, Event, Timestamp};

pub trait Emit
where
    Self: Sized,
{
    fn emit<K, V>(self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>;

    /// Specialization of [`emit`](Self::emit) for [`Timestamp`].
    fn emit_timestamp<K>(self, event_key: K, timestamp: &Timestamp) -> Self
    where
        K: Into<String>,
    {
        self.emit_to_string_value(event_key, timestamp.seconds())
    }

    /// Specialization of [`emit`](Self::emit) for values implementing [`ToString`].
    fn emit_to_string_value<K, V>(self, event_key: K, value: V) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.emit(event_key, value.to_string())
    }

    /// Specialization of [`emit`](Self::emit) for token amounts.
    fn emit_amount<K>(self, event_key: K, amount: Amount) -> Self
    where
        K: Into<String>,
    {
        self.emit_to_string_value(event_key, amount)
    }

    fn emit_tx_info(self, now: &Timestamp) -> Self {
        self.emit_timestamp("at", now)
    }

    fn emit_addr<K>(self, event_key: K, addr: &Addr) -> Self
    where
        K: Into<String>,
    {
        self.emit(event_key, addr.as_str())
    }
}

pub struct Emitter {
    event: Event,
}

impl Emitter {
    pub fn of_type<T>(event_type: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            event: Event::new(event_type.into()),
        }
    }
}

impl Emit for Emitter {
    fn emit<K, V>(mut self, event_key: K, event_value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.event = self.event.add_attribute(event_key, event_value);

        self
    }
}

impl From<Emitter> for Event {
    fn from(emitter: Emitter) -> Self {
        emitter.event
    }
}

/// Ordered record of the events emitted so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Journal(Vec<Event>);

impl Journal {
    pub fn record<E>(&mut self, event: E)
    where
        E: Into<Event>,
    {
        self.0.push(event.into())
    }

    pub fn events(&self) -> &[Event] {
        &self.0
    }

    pub fn of_type<'j>(&'j self, ty: &'j str) -> impl Iterator<Item = &'j Event> + 'j {
        self.0.iter().filter(move |event| event.ty == ty)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
