use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::button::{Button, BUTTONS};
use super::dispatch::{dispatch, Direction, Dispatch, Event};
use super::fader::{self, FaderCodec, FADER_LSB_CONTROL, FADER_MSB_CONTROL};
use super::glyph::glyph_indices;
use super::message::{self, MidiMessage};
use crate::error::{Error, Result};

/// Sink for outbound MIDI bytes.
///
/// Implemented for midir's output connection; tests substitute their own.
pub trait Output: Send {
    fn send(&mut self, message: &[u8]) -> Result<()>;

    /// Release the underlying port.
    fn close(self: Box<Self>) {}
}

/// Application behaviour for a FaderPort session.
///
/// Every hook receives the session's [`Controller`], so lights and the
/// fader can be driven straight from an event. Hooks run on the MIDI
/// input thread with the session locked; calling back into the owning
/// [`Session`] from a hook would deadlock.
pub trait Handler: Send + 'static {
    /// The ports are open and events will start flowing.
    fn on_open(&mut self, controller: &mut Controller);

    /// The session is about to close.
    fn on_close(&mut self, controller: &mut Controller);

    /// A button went down (`pressed`) or came back up.
    fn on_button(&mut self, controller: &mut Controller, button: Button, pressed: bool);

    /// The fader moved to `position`, in `0..=1023`.
    fn on_fader(&mut self, controller: &mut Controller, position: u16);

    /// The fader was touched or let go.
    fn on_fader_touch(&mut self, controller: &mut Controller, touched: bool);

    /// The "Pan" rotary moved one step.
    fn on_rotary(&mut self, controller: &mut Controller, direction: Direction);
}

/// Outbound control of the device, plus the fader state decoded from it.
pub struct Controller {
    output: Option<Box<dyn Output>>,
    codec: FaderCodec,
    fader: u16,
}

impl Controller {
    pub fn new(output: Box<dyn Output>) -> Self {
        Self {
            output: Some(output),
            codec: FaderCodec::new(),
            fader: 0,
        }
    }

    /// `false` once the output port has been released.
    pub fn is_open(&self) -> bool {
        self.output.is_some()
    }

    /// Last known fader position, in `0..=1023`.
    pub fn fader(&self) -> u16 {
        self.fader
    }

    /// Move the motorized fader. Values outside `1..=1023` move it to 0.
    ///
    /// While the "Off" button is lit the device stops reporting fader
    /// movement, so [`Handler::on_fader`] goes quiet until it is darkened.
    pub fn set_fader(&mut self, value: i32) -> Result<()> {
        self.fader = fader::clamp_position(value);
        let (msb, lsb) = fader::encode(self.fader);
        self.send(message::control_change(FADER_MSB_CONTROL, msb))?;
        self.send(message::control_change(FADER_LSB_CONTROL, lsb))
    }

    /// Light a button. Lighting "Off" silences fader updates.
    pub fn light_on(&mut self, button: Button) -> Result<()> {
        self.send(message::light(button.light, true))
    }

    pub fn light_off(&mut self, button: Button) -> Result<()> {
        self.send(message::light(button.light, false))
    }

    /// Light every button, one message at a time. Fader updates stop while
    /// "Off" is lit.
    pub fn all_on(&mut self) -> Result<()> {
        for button in BUTTONS {
            self.light_on(button)?;
        }
        Ok(())
    }

    pub fn all_off(&mut self) -> Result<()> {
        for button in BUTTONS {
            self.light_off(button)?;
        }
        Ok(())
    }

    /// Draw a hex digit with the button lights. Lights already on stay on;
    /// characters outside `0-9A-F` draw nothing.
    pub fn char_on(&mut self, c: char) -> Result<()> {
        let Some(indices) = glyph_indices(c) else {
            trace!(?c, "no glyph for character");
            return Ok(());
        };
        for &index in indices {
            self.light_on(BUTTONS[index])?;
        }
        Ok(())
    }

    /// Send "All Notes Off" and "Reset All Controllers" on every channel.
    pub fn reset(&mut self) -> Result<()> {
        for message in message::reset_messages() {
            self.send(message)?;
        }
        Ok(())
    }

    fn send(&mut self, message: MidiMessage) -> Result<()> {
        let output = self.output.as_mut().ok_or(Error::Closed)?;
        output.send(&message.to_bytes())
    }

    fn release(&mut self) {
        if let Some(output) = self.output.take() {
            output.close();
        }
        self.codec.reset();
        self.fader = 0;
    }
}

struct Shared<H> {
    controller: Controller,
    handler: H,
    attached: bool,
    closed: bool,
}

/// A handler bound to a device output, fed by inbound MIDI.
///
/// Cloning yields another handle to the same session. Inbound messages and
/// control calls are serialised through one lock, so a dispatch always runs
/// to completion before the next message or control call is processed.
pub struct Session<H> {
    shared: Arc<Mutex<Shared<H>>>,
}

impl<H> Clone for Session<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<H: Handler> Session<H> {
    /// Bind `handler` to `output`. Inbound messages are ignored until
    /// [`attach`](Self::attach) is called.
    pub fn new(output: Box<dyn Output>, handler: H) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                controller: Controller::new(output),
                handler,
                attached: false,
                closed: false,
            })),
        }
    }

    /// Start dispatching inbound messages and notify the handler.
    pub fn attach(&self) {
        let mut shared = self.shared.lock();
        let Shared {
            controller,
            handler,
            attached,
            closed,
        } = &mut *shared;
        if *closed {
            return;
        }
        *attached = true;
        handler.on_open(controller);
    }

    /// Decode one inbound message and deliver the resulting event.
    pub fn receive(&self, bytes: &[u8]) {
        let mut shared = self.shared.lock();
        let Shared {
            controller,
            handler,
            attached,
            ..
        } = &mut *shared;
        if !*attached {
            return;
        }

        match dispatch(bytes, &mut controller.codec) {
            Dispatch::Event(event) => {
                trace!(?event, "FaderPort event");
                deliver(handler, controller, event);
            }
            Dispatch::FaderMsb => trace!(msb = controller.codec.pending_msb(), "fader MSB"),
            Dispatch::Unhandled(raw) => debug!(?raw, "unhandled MIDI message"),
        }
    }

    /// Notify the handler, stop dispatching, then park the fader at 0,
    /// darken every light and reset the device.
    ///
    /// Only the first call does anything; the session stays closed even if
    /// restoring the device fails part way.
    pub fn detach(&self) -> Result<()> {
        let mut shared = self.shared.lock();
        let Shared {
            controller,
            handler,
            attached,
            closed,
        } = &mut *shared;
        if *closed {
            return Ok(());
        }
        *closed = true;
        handler.on_close(controller);
        *attached = false;
        controller.set_fader(0)?;
        controller.all_off()?;
        controller.reset()
    }

    /// Close the output port. Later control calls fail with
    /// [`Error::Closed`].
    pub fn release(&self) {
        self.shared.lock().controller.release();
    }

    pub fn is_attached(&self) -> bool {
        self.shared.lock().attached
    }

    /// `true` once [`detach`](Self::detach) has run.
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with_controller<R>(&self, f: impl FnOnce(&mut Controller) -> R) -> R {
        f(&mut self.shared.lock().controller)
    }

    /// Run `f` with exclusive access to the handler.
    pub fn with_handler<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(&mut self.shared.lock().handler)
    }

    pub fn fader(&self) -> u16 {
        self.with_controller(|c| c.fader())
    }

    pub fn set_fader(&self, value: i32) -> Result<()> {
        self.with_controller(|c| c.set_fader(value))
    }

    pub fn light_on(&self, button: Button) -> Result<()> {
        self.with_controller(|c| c.light_on(button))
    }

    pub fn light_off(&self, button: Button) -> Result<()> {
        self.with_controller(|c| c.light_off(button))
    }

    pub fn all_on(&self) -> Result<()> {
        self.with_controller(|c| c.all_on())
    }

    pub fn all_off(&self) -> Result<()> {
        self.with_controller(|c| c.all_off())
    }

    pub fn char_on(&self, c: char) -> Result<()> {
        self.with_controller(|controller| controller.char_on(c))
    }
}

fn deliver<H: Handler>(handler: &mut H, controller: &mut Controller, event: Event) {
    match event {
        Event::Button { button, pressed } => handler.on_button(controller, button, pressed),
        Event::FaderTouch { touched } => handler.on_fader_touch(controller, touched),
        Event::Fader { position } => {
            controller.fader = position;
            handler.on_fader(controller, position);
        }
        Event::Rotary { direction } => handler.on_rotary(controller, direction),
    }
}
