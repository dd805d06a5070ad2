//! Alert lifecycle controller
//!
//! The controller is the central brain that, once per tick:
//! - Takes at most one inbound SMS and applies it (registration, coordinates,
//!   emergency contacts)
//! - Classifies button clicks
//! - Runs the crash detector
//! - Services the countdown and dispatches the alert
//! - Hands at most one due message to the transport
//!
//! Nothing is logged here. Each tick returns the [`Activity`] records the
//! firmware logs.

use heapless::Vec;
use resq_protocol::outbound::{self, ComposeError, OutboundBody};
use resq_protocol::{
    parse_body, parse_registration, Coordinates, InboundSms, MessageError, Number, ParsedBody,
};

use crate::config::AlertConfig;
use crate::contacts::{ContactTable, Registration};
use crate::detect::CrashDetector;
use crate::dispatch::{DispatchError, DispatchOutcome, Dispatcher, MessageKind, Outbox};
use crate::input::{ClickClassifier, ClickCount};
use crate::state::{AlertState, Event};
use crate::traits::{AlertIndicator, MessageTransport, MotionSensor, SensorError, TransportError};

/// Maximum activity records produced by one tick
pub const MAX_ACTIVITIES: usize = 12;

pub type Activities = Vec<Activity, MAX_ACTIVITIES>;

/// Something the controller did during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    /// Sender captured as the rider
    Registered(Number),
    /// Message before registration without a pair line
    RegistrationIgnored,
    CoordinatesUpdated,
    ContactsUpdated { count: u8 },
    MessageRejected(MessageError),
    Transition { from: AlertState, to: AlertState },
    Dispatch(DispatchOutcome),
    Sent(MessageKind),
    SendFailed { kind: MessageKind, error: TransportError },
    SensorReadFailed(SensorError),
    /// A message could not be queued (outbox overflow)
    QueueFailed(DispatchError),
}

fn record(activities: &mut Activities, activity: Activity) {
    let _ = activities.push(activity);
}

/// Crash-response controller for one rider
pub struct AlertController {
    config: AlertConfig,
    state: AlertState,
    registration: Registration,
    contacts: ContactTable,
    /// Last reported coordinates; empty when unknown
    coordinates: Coordinates,
    detector: CrashDetector,
    clicks: ClickClassifier,
    dispatcher: Dispatcher,
    outbox: Outbox,
    countdown_start_ms: u32,
}

impl AlertController {
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            state: AlertState::Idle,
            registration: Registration::Unregistered,
            contacts: ContactTable::new(),
            coordinates: Coordinates::new(),
            detector: CrashDetector::new(config.detector),
            clicks: ClickClassifier::new(config.button),
            dispatcher: Dispatcher::new(config.modem),
            outbox: Outbox::new(),
            countdown_start_ms: 0,
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn contacts(&self) -> &ContactTable {
        &self.contacts
    }

    pub fn coordinates(&self) -> &str {
        &self.coordinates
    }

    /// Messages waiting in the outbox
    pub fn pending_messages(&self) -> usize {
        self.outbox.len()
    }

    /// Time left before the alert goes out on its own
    pub fn countdown_remaining_ms(&self, now_ms: u32) -> Option<u32> {
        if !self.state.is_pending() {
            return None;
        }
        let elapsed = now_ms.wrapping_sub(self.countdown_start_ms);
        Some(self.config.alert.countdown_ms.saturating_sub(elapsed))
    }

    /// Check the motion sensor and seed the detector
    ///
    /// A failure is fatal: the controller enters [`AlertState::Faulted`],
    /// holds the indicator on and ignores every later tick.
    pub fn start<S, I>(&mut self, sensor: &mut S, indicator: &mut I) -> Result<(), SensorError>
    where
        S: MotionSensor + ?Sized,
        I: AlertIndicator + ?Sized,
    {
        match sensor.self_test().and_then(|()| sensor.read_acceleration()) {
            Ok(sample) => {
                self.detector.prime(sample);
                indicator.set_blinking(false);
                indicator.set_steady(false);
                Ok(())
            }
            Err(e) => {
                self.state = self.state.transition(Event::FaultDetected(e.into()));
                indicator.set_blinking(false);
                indicator.set_steady(true);
                Err(e)
            }
        }
    }

    /// Run one iteration of the control loop
    pub fn tick<T, S, I>(
        &mut self,
        now_ms: u32,
        button_pressed: bool,
        transport: &mut T,
        sensor: &mut S,
        indicator: &mut I,
    ) -> Activities
    where
        T: MessageTransport + ?Sized,
        S: MotionSensor + ?Sized,
        I: AlertIndicator + ?Sized,
    {
        let mut activities = Activities::new();

        if self.state.is_faulted() {
            return activities;
        }

        if let Some(sms) = transport.poll_incoming() {
            self.handle_message(&sms, &mut activities);
        }

        // Everything but the outbox waits for registration
        if self.registration.is_registered() {
            let mut clicks = self.clicks.poll_clicks(button_pressed, now_ms);

            match sensor.read_acceleration() {
                Ok(sample) => {
                    let crash = self.detector.evaluate(sample);
                    if crash && self.state == AlertState::Idle {
                        self.begin_countdown(now_ms, indicator, &mut activities);
                        clicks = None;
                    }
                }
                Err(e) => record(&mut activities, Activity::SensorReadFailed(e)),
            }

            if self.state.is_pending() {
                self.service_countdown(now_ms, clicks, indicator, &mut activities);
            }
        }

        if let Some(report) = self.outbox.flush(now_ms, transport) {
            let activity = match report.result {
                Ok(()) => Activity::Sent(report.kind),
                Err(error) => Activity::SendFailed {
                    kind: report.kind,
                    error,
                },
            };
            record(&mut activities, activity);
        }

        activities
    }

    fn apply(&mut self, event: Event, activities: &mut Activities) {
        let from = self.state;
        let to = from.transition(event);
        if to != from {
            self.state = to;
            record(activities, Activity::Transition { from, to });
        }
    }

    fn handle_message(&mut self, sms: &InboundSms, activities: &mut Activities) {
        if !self.registration.is_registered() {
            let Some(user) = parse_registration(&sms.body, &sms.sender) else {
                record(activities, Activity::RegistrationIgnored);
                return;
            };
            let number = user.number.clone();
            self.registration.register(user);
            record(activities, Activity::Registered(number.clone()));
            self.queue(
                MessageKind::RegistrationConfirmation,
                &number,
                outbound::compose_registration_confirmation(),
                activities,
            );
            return;
        }

        match parse_body(&sms.body) {
            Ok(ParsedBody::CoordinateUpdate {
                coordinates,
                contacts,
            }) => {
                self.coordinates = coordinates;
                record(activities, Activity::CoordinatesUpdated);
                if let Some(list) = contacts {
                    self.contacts.replace(list);
                    record(
                        activities,
                        Activity::ContactsUpdated {
                            count: self.contacts.len() as u8,
                        },
                    );
                }
            }
            Ok(ParsedBody::ContactList(list)) => {
                self.contacts.replace(list);
                record(
                    activities,
                    Activity::ContactsUpdated {
                        count: self.contacts.len() as u8,
                    },
                );
            }
            Err(e) => record(activities, Activity::MessageRejected(e)),
        }
    }

    fn queue(
        &mut self,
        kind: MessageKind,
        recipient: &Number,
        body: Result<OutboundBody, ComposeError>,
        activities: &mut Activities,
    ) {
        let queued = body.map_err(DispatchError::from).and_then(|body| {
            self.dispatcher
                .queue(&mut self.outbox, kind, recipient, body)
                .map_err(DispatchError::from)
        });
        if let Err(e) = queued {
            record(activities, Activity::QueueFailed(e));
        }
    }

    fn begin_countdown<I>(&mut self, now_ms: u32, indicator: &mut I, activities: &mut Activities)
    where
        I: AlertIndicator + ?Sized,
    {
        self.apply(Event::CrashDetected, activities);
        self.countdown_start_ms = now_ms;
        // Presses made before the crash must not answer it
        self.clicks.reset();
        indicator.set_blinking(true);

        if let Some(number) = self.registration.user().map(|u| u.number.clone()) {
            self.queue(
                MessageKind::CrashPrompt,
                &number,
                outbound::compose_crash_prompt(),
                activities,
            );
        }
    }

    fn service_countdown<I>(
        &mut self,
        now_ms: u32,
        clicks: Option<ClickCount>,
        indicator: &mut I,
        activities: &mut Activities,
    ) where
        I: AlertIndicator + ?Sized,
    {
        let elapsed = now_ms.wrapping_sub(self.countdown_start_ms);
        let event = match clicks {
            Some(ClickCount::Double) => Event::Confirmed,
            Some(ClickCount::Triple) => Event::Cancelled,
            None if elapsed >= self.config.alert.countdown_ms => Event::CountdownElapsed,
            None => return,
        };

        indicator.set_blinking(false);
        self.apply(event, activities);

        if self.state == AlertState::Dispatched {
            self.dispatch(activities);
            self.apply(Event::DispatchComplete, activities);
        }
    }

    fn dispatch(&mut self, activities: &mut Activities) {
        let Some(user) = self.registration.user() else {
            return;
        };
        let result = self.dispatcher.dispatch(
            &mut self.outbox,
            user,
            &mut self.coordinates,
            &mut self.contacts,
        );
        match result {
            Ok(outcome) => record(activities, Activity::Dispatch(outcome)),
            Err(e) => record(activities, Activity::QueueFailed(e)),
        }
    }
}
