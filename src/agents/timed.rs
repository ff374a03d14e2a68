use super::{Agent, AgentError, Decision, DecisionInput};
use log::warn;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Result of one timed decision request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Outcome {
    Decided(Decision),
    TimedOut,
    Failed(AgentError),
}

struct Request {
    seq: u64,
    input: DecisionInput,
}

struct Reply {
    seq: u64,
    result: Result<Decision, AgentError>,
}

/// Runs an agent on its own thread and bounds every decision by a wall-clock timeout.
///
/// A reply that arrives after its request timed out is dropped when the next
/// request is made; the worker is never interrupted, only ignored.
pub struct TimedAgent {
    name: String,
    timeout: Duration,
    seq: u64,
    requests: Option<Sender<Request>>,
    replies: Receiver<Reply>,
}

impl std::fmt::Debug for TimedAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimedAgent({}, {:?})", self.name, self.timeout)
    }
}

impl TimedAgent {
    pub fn spawn(mut agent: Box<dyn Agent>, timeout: Duration) -> Self {
        let name = agent.name().to_string();
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (rep_tx, rep_rx) = mpsc::channel::<Reply>();

        let worker = move || {
            for Request { seq, input } in req_rx {
                let result = panic::catch_unwind(AssertUnwindSafe(|| agent.decide(&input)))
                    .unwrap_or(Err(AgentError::Panicked));
                if rep_tx.send(Reply { seq, result }).is_err() {
                    break;
                }
            }
        };
        let requests = match thread::Builder::new().name(format!("agent-{name}")).spawn(worker) {
            Ok(_) => Some(req_tx),
            Err(e) => {
                warn!("could not start agent {name}: {e}");
                None
            }
        };

        Self { name, timeout, seq: 0, requests, replies: rep_rx }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Hand `input` to the agent and wait at most the timeout for its answer.
    pub fn request(&mut self, input: DecisionInput) -> Outcome {
        let Some(requests) = &self.requests else {
            return Outcome::Failed(AgentError::Failed("agent worker is not running".into()));
        };
        self.seq += 1;
        let seq = self.seq;
        if requests.send(Request { seq, input }).is_err() {
            self.requests = None;
            return Outcome::Failed(AgentError::Failed("agent worker stopped".into()));
        }

        let deadline = Instant::now() + self.timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.replies.recv_timeout(left) {
                Ok(reply) if reply.seq == seq => {
                    return match reply.result {
                        Ok(decision) => Outcome::Decided(decision),
                        Err(e) => Outcome::Failed(e),
                    };
                }
                // late answer to an earlier request
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => return Outcome::TimedOut,
                Err(RecvTimeoutError::Disconnected) => {
                    self.requests = None;
                    return Outcome::Failed(AgentError::Failed("agent worker stopped".into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{CallingStation, Scripted};
    use crate::history::Street;
    use crate::player::Player;
    use crate::rules::Rules;

    fn input() -> DecisionInput {
        let me = Player::new(0, 100).public_info();
        DecisionInput {
            seat: 0,
            rules: Rules::default(),
            street: Street::Preflop,
            hand: "As Ad".parse().unwrap(),
            community: Vec::new(),
            pot: 30,
            highest_bet: 20,
            minimum_raise: 10,
            owed: 10,
            me: me.clone(),
            players: vec![me],
            round_actions: Vec::new(),
            history: Vec::new(),
        }
    }

    struct Sleeper(Duration);

    impl Agent for Sleeper {
        fn name(&self) -> &str {
            "sleeper"
        }
        fn decide(&mut self, _: &DecisionInput) -> Result<Decision, AgentError> {
            thread::sleep(self.0);
            Ok(Decision::Call)
        }
    }

    struct Panicker;

    impl Agent for Panicker {
        fn name(&self) -> &str {
            "panicker"
        }
        fn decide(&mut self, _: &DecisionInput) -> Result<Decision, AgentError> {
            panic!("boom")
        }
    }

    #[test]
    fn decides_within_timeout() {
        let mut agent = TimedAgent::spawn(Box::new(CallingStation::new()), Duration::from_secs(2));
        assert_eq!(agent.request(input()), Outcome::Decided(Decision::Call));
        assert_eq!(agent.name(), "calling_station");
    }

    #[test]
    fn slow_agent_times_out_and_late_reply_is_dropped() {
        let mut agent =
            TimedAgent::spawn(Box::new(Sleeper(Duration::from_millis(150))), Duration::from_millis(20));
        assert_eq!(agent.request(input()), Outcome::TimedOut);
        thread::sleep(Duration::from_millis(200));
        // the stale reply for request 1 is skipped, request 2 times out on its own
        assert_eq!(agent.request(input()), Outcome::TimedOut);
    }

    #[test]
    fn panic_is_reported_as_failure() {
        let mut agent = TimedAgent::spawn(Box::new(Panicker), Duration::from_secs(2));
        assert_eq!(agent.request(input()), Outcome::Failed(AgentError::Panicked));
        // the worker survives the panic
        assert_eq!(agent.request(input()), Outcome::Failed(AgentError::Panicked));
    }

    #[test]
    fn scripted_errors_pass_through() {
        let mut agent =
            TimedAgent::spawn(Box::new(Scripted::from_tokens(["oops"])), Duration::from_secs(2));
        assert!(matches!(
            agent.request(input()),
            Outcome::Failed(AgentError::InvalidDecision(_))
        ));
    }
}
