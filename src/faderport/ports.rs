use midir::{MidiIO, MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};
use tracing::{info, warn};

use super::button::Button;
use super::session::{Controller, Handler, Output, Session};
use crate::config::Config;
use crate::error::{Error, PortDirection, Result};

/// Position in `names` of the `index`-th name starting with `prefix`,
/// ignoring case.
pub fn select_port<S: AsRef<str>>(names: &[S], prefix: &str, index: usize) -> Option<usize> {
    let prefix = prefix.to_lowercase();
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_ref().to_lowercase().starts_with(&prefix))
        .map(|(position, _)| position)
        .nth(index)
}

fn find_port<T: MidiIO>(
    midi_io: &T,
    direction: PortDirection,
    prefix: &str,
    index: usize,
) -> Result<(T::Port, String)> {
    let ports = midi_io.ports();
    let names: Vec<String> = ports
        .iter()
        .map(|port| midi_io.port_name(port).unwrap_or_default())
        .collect();

    select_port(names.as_slice(), prefix, index)
        .map(|position| (ports[position].clone(), names[position].clone()))
        .ok_or_else(|| Error::PortNotFound {
            direction,
            prefix: prefix.to_string(),
            index,
        })
}

impl Output for MidiOutputConnection {
    fn send(&mut self, message: &[u8]) -> Result<()> {
        MidiOutputConnection::send(self, message)?;
        Ok(())
    }

    fn close(self: Box<Self>) {
        let _ = MidiOutputConnection::close(*self);
    }
}

/// An open FaderPort: both MIDI ports connected and inbound messages
/// dispatched to a [`Handler`].
///
/// Closing (explicitly or by drop) notifies the handler, parks the fader
/// at 0, turns every light off, resets the device and releases the ports.
pub struct FaderPort<H: Handler> {
    session: Session<H>,
    input: Option<MidiInputConnection<()>>,
    input_name: String,
    output_name: String,
}

impl<H: Handler> FaderPort<H> {
    /// Open the `index`-th FaderPort with the default port prefix.
    pub fn open_index(index: usize, handler: H) -> Result<Self> {
        Self::open(
            &Config {
                index,
                ..Config::default()
            },
            handler,
        )
    }

    /// Open the device described by `config` and call
    /// [`Handler::on_open`].
    pub fn open(config: &Config, handler: H) -> Result<Self> {
        let midi_in = MidiInput::new(&config.client_name)
            .map_err(|err| Error::MidiInit(format!("input: {err}")))?;
        let midi_out = MidiOutput::new(&config.client_name)
            .map_err(|err| Error::MidiInit(format!("output: {err}")))?;

        let (in_port, input_name) = find_port(
            &midi_in,
            PortDirection::Input,
            &config.port_prefix,
            config.index,
        )?;
        let (out_port, output_name) = find_port(
            &midi_out,
            PortDirection::Output,
            &config.port_prefix,
            config.index,
        )?;

        let connection = midi_out
            .connect(&out_port, "faderport-out")
            .map_err(|err| Error::Connection(err.to_string()))?;
        let session = Session::new(Box::new(connection), handler);

        let receiver = session.clone();
        let input = match midi_in.connect(
            &in_port,
            "faderport-in",
            move |_stamp, message, _| receiver.receive(message),
            (),
        ) {
            Ok(input) => input,
            Err(err) => {
                session.release();
                return Err(Error::Connection(err.to_string()));
            }
        };

        info!(input = %input_name, output = %output_name, "FaderPort opened");
        session.attach();

        Ok(Self {
            session,
            input: Some(input),
            input_name,
            output_name,
        })
    }

    /// Close the device, reporting any failure while restoring it. Read
    /// anything needed from the handler with [`with_handler`](Self::with_handler)
    /// first.
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    pub fn session(&self) -> &Session<H> {
        &self.session
    }

    pub fn input_name(&self) -> &str {
        &self.input_name
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn fader(&self) -> u16 {
        self.session.fader()
    }

    pub fn set_fader(&self, value: i32) -> Result<()> {
        self.session.set_fader(value)
    }

    pub fn light_on(&self, button: Button) -> Result<()> {
        self.session.light_on(button)
    }

    pub fn light_off(&self, button: Button) -> Result<()> {
        self.session.light_off(button)
    }

    pub fn all_on(&self) -> Result<()> {
        self.session.all_on()
    }

    pub fn all_off(&self) -> Result<()> {
        self.session.all_off()
    }

    pub fn char_on(&self, c: char) -> Result<()> {
        self.session.char_on(c)
    }

    pub fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> R {
        self.session.with_controller(f)
    }

    pub fn with_handler<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        self.session.with_handler(f)
    }

    fn shutdown(&mut self) -> Result<()> {
        if self.session.is_closed() {
            return Ok(());
        }

        let restored = self.session.detach();
        if let Some(input) = self.input.take() {
            let _ = input.close();
        }
        self.session.release();
        info!(input = %self.input_name, output = %self.output_name, "FaderPort closed");
        restored
    }
}

impl<H: Handler> Drop for FaderPort<H> {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!("failed to restore FaderPort on close: {err}");
        }
    }
}
