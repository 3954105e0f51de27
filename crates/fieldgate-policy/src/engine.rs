use fieldgate_wire::{AppCat, Command, NodeAddr, Report};

use crate::error::PolicyError;

/// Policy constants, injected at engine construction.
///
/// `Default` carries the deployed values; there is no hidden shared
/// state behind these.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Light readings below this switch the lights on.
    pub light_threshold: i64,
    /// Duration of an emitted LIGHT_ON command, in seconds.
    pub light_on_secs: i64,
    /// Duration of a scheduled IRRIGATION_ON command, in seconds.
    pub irrigation_on_secs: i64,
    /// Loop iterations between scheduled irrigation commands.
    /// Zero disables the scheduled path entirely.
    pub tick_interval: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            light_threshold: 20,
            light_on_secs: 2,
            irrigation_on_secs: 10,
            tick_interval: 20,
        }
    }
}

/// The dispatch/policy state machine.
///
/// Owns the tick counter and the last known target address explicitly;
/// both live exactly as long as the engine (process lifetime in
/// practice, never persisted).
#[derive(Debug)]
pub struct Engine {
    config: PolicyConfig,
    ticks: u64,
    last_target: Option<NodeAddr>,
}

impl Engine {
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            config,
            ticks: 0,
            last_target: None,
        }
    }

    /// Reactive path: feed one successfully decoded report, get back the
    /// command to send, if any.
    ///
    /// Every decoded report with a wire-safe source updates the last
    /// known target, whatever its category — the scheduled path reuses
    /// the most recently observed source address. A source carrying a
    /// wire delimiter can never be commanded, so it is not recorded and
    /// the scheduled path keeps the last usable address.
    pub fn observe(&mut self, report: &Report) -> Option<Command> {
        if report.src.is_wire_safe() {
            self.last_target = Some(report.src.clone());
        }

        let payload = report.actionable()?;
        match payload.cat {
            AppCat::LightLevel if payload.value < self.config.light_threshold => Some(
                Command::light_on(report.src.clone(), self.config.light_on_secs),
            ),
            // IRRIGATION_ACK is acknowledgment-only; everything else
            // under this rank/category is received but not acted upon.
            _ => None,
        }
    }

    /// Scheduled path: advance the tick counter by one and return the
    /// irrigation command when the interval comes due.
    ///
    /// The counter starts at 0 and the check runs before the increment,
    /// so the very first iteration is due. A due tick with no known
    /// target is [`PolicyError::UnresolvedTarget`]; the counter has
    /// still advanced when that happens. An interval of zero means no
    /// tick is ever due.
    pub fn tick(&mut self) -> Result<Option<Command>, PolicyError> {
        let interval = self.config.tick_interval;
        let due = interval != 0 && self.ticks % interval == 0;
        self.ticks += 1;

        if !due {
            return Ok(None);
        }

        let target = self
            .last_target
            .clone()
            .ok_or(PolicyError::UnresolvedTarget)?;
        Ok(Some(Command::irrigation_on(
            target,
            self.config.irrigation_on_secs,
        )))
    }

    /// Loop iterations completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Source address of the most recently decoded inbound message.
    pub fn last_target(&self) -> Option<&NodeAddr> {
        self.last_target.as_ref()
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use fieldgate_wire::{decode, AppPayload, Decoded, MsgCat, Rank};

    use super::*;

    fn report(frame: &[u8]) -> Report {
        match decode(frame).unwrap() {
            Decoded::Report(report) => report,
            Decoded::Ignored => panic!("test frame must decode"),
        }
    }

    fn sensor_light(src: &str, value: i64) -> Report {
        Report {
            rank: Rank::Sensor,
            msgcat: MsgCat::Application,
            app: Some(AppPayload {
                cat: AppCat::LightLevel,
                value,
            }),
            src: NodeAddr::new(src),
        }
    }

    #[test]
    fn dark_reading_switches_lights_on() {
        let mut engine = Engine::new(PolicyConfig::default());
        let cmd = engine.observe(&sensor_light("A1", 15)).unwrap();

        assert_eq!(cmd.appcat, AppCat::LightOn);
        assert_eq!(cmd.value, 2);
        assert_eq!(cmd.target.as_str(), "A1");
        assert_eq!(cmd.rank, Rank::Gateway);
        assert_eq!(cmd.msgcat, MsgCat::Application);
    }

    #[test]
    fn threshold_boundary() {
        let mut engine = Engine::new(PolicyConfig::default());
        assert!(engine.observe(&sensor_light("A1", 19)).is_some());
        assert!(engine.observe(&sensor_light("A1", 20)).is_none());
        assert!(engine.observe(&sensor_light("A1", 25)).is_none());
    }

    #[test]
    fn irrigation_ack_never_commands() {
        let mut engine = Engine::new(PolicyConfig::default());
        for value in [0, 1, -3, 100] {
            let report = Report {
                rank: Rank::Sensor,
                msgcat: MsgCat::Application,
                app: Some(AppPayload {
                    cat: AppCat::IrrigationAck,
                    value,
                }),
                src: NodeAddr::new("A1"),
            };
            assert!(engine.observe(&report).is_none());
        }
    }

    #[test]
    fn non_sensor_or_non_application_never_commands() {
        let mut engine = Engine::new(PolicyConfig::default());

        // Dark reading, but from a subgateway.
        let r = report(br#"[2serv]{"rank":1,"msgcat":4,"appcat":1,"src":"A1","value":5}"#);
        assert!(engine.observe(&r).is_none());

        // Handshake traffic.
        let r = report(br#"[2serv]{"rank":2,"msgcat":1,"src":"A1"}"#);
        assert!(engine.observe(&r).is_none());
    }

    #[test]
    fn first_tick_without_target_fails() {
        let mut engine = Engine::new(PolicyConfig::default());
        let err = engine.tick().unwrap_err();
        assert!(matches!(err, PolicyError::UnresolvedTarget));
        // The counter advanced anyway.
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn first_tick_with_target_fires() {
        let mut engine = Engine::new(PolicyConfig::default());
        engine.observe(&sensor_light("A1", 50));

        let cmd = engine.tick().unwrap().unwrap();
        assert_eq!(cmd.appcat, AppCat::IrrigationOn);
        assert_eq!(cmd.value, 10);
        assert_eq!(cmd.target.as_str(), "A1");
    }

    #[test]
    fn tick_indexing_convention() {
        // Fires on iterations where the pre-increment counter is
        // congruent to 0 mod interval: iterations 1, 21, 41, ... After N
        // iterations it has fired floor((N - 1) / interval) + 1 times.
        let mut engine = Engine::new(PolicyConfig::default());
        engine.observe(&sensor_light("A1", 50));

        let mut fired = 0u64;
        for n in 1..=41u64 {
            if engine.tick().unwrap().is_some() {
                fired += 1;
            }
            assert_eq!(engine.ticks(), n);
            assert_eq!(fired, (n - 1) / 20 + 1, "after {n} iterations");
        }
        assert_eq!(fired, 3); // iterations 1, 21 and 41
    }

    #[test]
    fn zero_interval_never_schedules() {
        let mut engine = Engine::new(PolicyConfig {
            tick_interval: 0,
            ..PolicyConfig::default()
        });

        // No target known and none needed: a zero interval means the
        // scheduled path is off, not due every iteration.
        for n in 1..=5u64 {
            assert!(engine.tick().unwrap().is_none());
            assert_eq!(engine.ticks(), n);
        }

        engine.observe(&sensor_light("A1", 50));
        assert!(engine.tick().unwrap().is_none());
    }

    #[test]
    fn wire_unsafe_source_is_not_recorded_as_target() {
        let mut engine = Engine::new(PolicyConfig {
            tick_interval: 1,
            ..PolicyConfig::default()
        });

        engine.observe(&sensor_light("a|b", 50));
        assert_eq!(engine.last_target(), None);

        engine.observe(&sensor_light("A1", 50));
        engine.observe(&sensor_light("a|b", 50));
        // The scheduled path keeps the last usable address.
        assert_eq!(engine.tick().unwrap().unwrap().target.as_str(), "A1");
    }

    #[test]
    fn scheduled_target_tracks_most_recent_report() {
        let mut engine = Engine::new(PolicyConfig {
            tick_interval: 1,
            ..PolicyConfig::default()
        });

        engine.observe(&sensor_light("A1", 50));
        assert_eq!(engine.tick().unwrap().unwrap().target.as_str(), "A1");

        // Even a non-actionable report moves the target.
        let hello = report(br#"[2serv]{"rank":1,"msgcat":1,"src":"B2"}"#);
        engine.observe(&hello);
        assert_eq!(engine.tick().unwrap().unwrap().target.as_str(), "B2");
    }

    #[test]
    fn custom_config_flows_through() {
        let mut engine = Engine::new(PolicyConfig {
            light_threshold: 5,
            light_on_secs: 7,
            irrigation_on_secs: 30,
            tick_interval: 2,
        });

        assert!(engine.observe(&sensor_light("A1", 5)).is_none());
        let cmd = engine.observe(&sensor_light("A1", 4)).unwrap();
        assert_eq!(cmd.value, 7);

        assert_eq!(engine.tick().unwrap().unwrap().value, 30); // tick 0
        assert!(engine.tick().unwrap().is_none()); // tick 1
        assert!(engine.tick().unwrap().is_some()); // tick 2
    }
}
