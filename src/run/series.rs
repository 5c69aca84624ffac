use super::record::RoundRecord;
use super::round::Round;
use crate::cards::Deck;
use crate::config::Config;
use crate::play::rotation;
use crate::players::Agent;
use crate::providers;
use crate::table::Holdem;
use crate::Chips;
use anyhow::ensure;
use anyhow::Result;
use colored::Colorize;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Drives a whole match: N sequential rounds over one persistent roster,
/// advancing the button by one seat after every round, then aggregates the
/// performance report. Owns the agents outright; rounds borrow them one at
/// a time, so nothing about their stacks or memory is ever shared.
pub struct Series {
    agents: Vec<Agent>,
    rounds: u64,
    blinds: (Chips, Chips),
    offset: usize,
    monologue: bool,
    rng: SmallRng,
    records: Vec<RoundRecord>,
}

impl Series {
    pub fn new(config: &Config) -> Result<Self> {
        ensure!(config.agents.len() >= 2, "a match takes at least two agents");
        let agents = config
            .agents
            .iter()
            .map(|profile| {
                let provider = providers::bind(profile.provider, profile.model.as_deref())?;
                Ok(Agent::new(
                    &profile.name,
                    provider,
                    config.stack,
                    profile.reflection.unwrap_or(config.reflection),
                    None,
                ))
            })
            .collect::<Result<Vec<Agent>>>()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Ok(Self {
            agents,
            rounds: config.rounds,
            blinds: config.blinds,
            offset: 0,
            monologue: config.monologue,
            rng,
            records: Vec::new(),
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub async fn run(mut self) -> Result<Report> {
        for id in 0..self.rounds {
            if let Some(broke) = self.agents.iter().find(|a| a.stack() == 0) {
                // an eliminated agent means no legal round can be built;
                // end the match here and report what was played
                log::error!(
                    "{} is out of chips after {} hands; ending the match",
                    broke.name(),
                    self.records.len()
                );
                break;
            }
            self.play_round(id).await?;
        }
        Ok(self.report())
    }

    /// one full round at the current rotation offset
    pub async fn play_round(&mut self, id: u64) -> Result<()> {
        let k = self.agents.len();
        let stacks = (0..k)
            .map(|seat| self.agents[rotation::seat_to_agent(seat, self.offset, k)].stack())
            .collect::<Vec<Chips>>();
        let deck = Deck::shuffled(&mut self.rng);
        let table = Holdem::deal(&stacks, self.blinds, deck)?;
        let record = Round::new(id, self.offset, table, self.monologue)
            .play(&mut self.agents)
            .await?;
        self.settle(&record).await;
        self.records.push(record);
        self.offset = (self.offset + 1) % k;
        Ok(())
    }

    /// stack settlement plus the round-boundary memory transition, routed
    /// back through the same seat mapping that dispatched the decisions
    async fn settle(&mut self, record: &RoundRecord) {
        let k = self.agents.len();
        for seat in 0..k {
            let agent = rotation::seat_to_agent(seat, record.offset, k);
            let stack = (record.stacks[seat] as i64 + record.profit(seat)) as Chips;
            self.agents[agent].set_stack(stack);
            self.agents[agent].absorb(record, seat).await;
        }
    }

    fn report(&self) -> Report {
        let rows = self
            .agents
            .iter()
            .enumerate()
            .map(|(idx, agent)| self.row(idx, agent))
            .collect::<Vec<Row>>();
        let imbalance = self.agents.iter().map(Agent::profit).sum::<i64>();
        if imbalance != 0 {
            // accounting bug somewhere, but results still print
            log::warn!("zero-sum violated: agent profits sum to {}", imbalance);
        }
        Report {
            rounds: self.records.len(),
            rows,
            imbalance,
        }
    }

    /// stats re-derived from the records, mapping this agent back to its
    /// seat through each round's own recorded offset
    fn row(&self, idx: usize, agent: &Agent) -> Row {
        let played = self.records.len();
        let seated = |record: &RoundRecord| rotation::agent_to_seat(idx, record.offset, record.seats());
        let wins = self
            .records
            .iter()
            .filter(|r| r.profit(seated(r)) > 0)
            .count();
        let vpip = self.records.iter().filter(|r| r.vpip(seated(r))).count();
        let pfr = self.records.iter().filter(|r| r.pfr(seated(r))).count();
        Row {
            name: agent.name().to_string(),
            wins,
            played,
            profit: agent.profit(),
            vpip: percent(vpip, played),
            pfr: percent(pfr, played),
            illegal: agent.illegal(),
            latency: agent.mean_latency(),
            notes: agent.notes().chars().take(100).collect(),
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    match whole {
        0 => 0.0,
        _ => part as f64 / whole as f64 * 100.0,
    }
}

/// End-of-match performance summary, one row per agent.
#[derive(Debug)]
pub struct Report {
    pub rounds: usize,
    pub rows: Vec<Row>,
    pub imbalance: i64,
}

#[derive(Debug)]
pub struct Row {
    pub name: String,
    pub wins: usize,
    pub played: usize,
    pub profit: i64,
    pub vpip: f64,
    pub pfr: f64,
    pub illegal: usize,
    pub latency: std::time::Duration,
    pub notes: String,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", "=== Performance Summary ===".bold())?;
        for row in self.rows.iter() {
            let rate = percent(row.wins, row.played);
            let profit = match row.profit {
                p if p > 0 => format!("+{}", p).green(),
                p if p < 0 => format!("{}", p).red(),
                _ => "0".normal(),
            };
            writeln!(
                f,
                "{}: {}/{} wins ({:.1}%), Profit: {}, VPIP: {:.1}%, PFR: {:.1}%, illegal: {}, avg decision: {:?}",
                row.name.bold(),
                row.wins,
                row.played,
                rate,
                profit,
                row.vpip,
                row.pfr,
                row.illegal,
                row.latency,
            )?;
            if !row.notes.is_empty() {
                writeln!(f, "  Notes: {}...", row.notes)?;
            }
        }
        if self.imbalance != 0 {
            writeln!(
                f,
                "{}",
                format!("warning: profits sum to {}, not zero", self.imbalance).yellow()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;
    use crate::config::Profile;

    fn config(agents: Vec<Profile>, rounds: u64) -> Config {
        Config {
            rounds,
            blinds: (50, 100),
            stack: 10_000,
            seed: Some(42),
            reflection: false,
            monologue: false,
            agents,
        }
    }
    fn profile(name: &str, provider: Backend) -> Profile {
        Profile {
            name: name.to_string(),
            provider,
            model: None,
            reflection: None,
        }
    }

    #[tokio::test]
    async fn blind_steal_and_rotation() {
        let config = config(
            vec![
                profile("Fred", Backend::Folder),
                profile("Callie", Backend::Caller),
            ],
            2,
        );
        let mut series = Series::new(&config).unwrap();

        series.play_round(0).await.unwrap();
        // Fred opened on the button, folded to the big blind, lost his small
        // blind; the rotation advanced by exactly one
        assert_eq!(series.agents()[0].profit(), -50);
        assert_eq!(series.agents()[1].profit(), 50);
        assert_eq!(series.offset(), 1);
        assert_eq!(series.records()[0].offset, 0);

        series.play_round(1).await.unwrap();
        assert_eq!(series.offset(), 0);
        assert_eq!(series.records()[1].offset, 1);
        // chips only move between the two of them
        let total = series.agents().iter().map(Agent::profit).sum::<i64>();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn match_zero_sum_and_report() {
        let config = config(
            vec![
                profile("Razor", Backend::Raiser),
                profile("Callie", Backend::Caller),
                profile("Fred", Backend::Folder),
            ],
            4,
        );
        let report = Series::new(&config).unwrap().run().await.unwrap();
        assert_eq!(report.imbalance, 0);
        assert_eq!(report.rows.len(), 3);
        let profits = report.rows.iter().map(|r| r.profit).sum::<i64>();
        assert_eq!(profits, 0);
    }

    #[tokio::test]
    async fn per_round_profits_sum_to_zero() {
        let config = config(
            vec![
                profile("Razor", Backend::Raiser),
                profile("Callie", Backend::Caller),
            ],
            3,
        );
        let mut series = Series::new(&config).unwrap();
        for id in 0..3 {
            series.play_round(id).await.unwrap();
        }
        for record in series.records() {
            assert_eq!(record.profits.iter().sum::<i64>(), 0);
        }
    }

    #[tokio::test]
    async fn memory_accumulates_and_stays_bounded() {
        let config = config(
            vec![
                profile("Fred", Backend::Folder),
                profile("Callie", Backend::Caller),
            ],
            7,
        );
        let mut series = Series::new(&config).unwrap();
        for id in 0..7 {
            series.play_round(id).await.unwrap();
        }
        let fred = &series.agents()[0];
        assert_eq!(fred.history().len(), 7);
        // summaries capped at 5 regardless of rounds played, oldest gone
        let kept = fred.memory().summaries().cloned().collect::<Vec<_>>();
        assert_eq!(kept.len(), 5);
        assert!(kept[0].starts_with("Hand #2"));
        assert!(kept[4].starts_with("Hand #6"));
    }

    #[tokio::test]
    async fn win_recount_uses_recorded_offsets() {
        let config = config(
            vec![
                profile("Fred", Backend::Folder),
                profile("Callie", Backend::Caller),
            ],
            2,
        );
        let report = Series::new(&config).unwrap().run().await.unwrap();
        let fred = &report.rows[0];
        let callie = &report.rows[1];
        // hand 0: Fred folds on the button and forfeits his small blind to
        // Callie, whatever hand 1's showdown brings
        assert!(callie.wins >= 1);
        assert!(fred.profit <= -50);
        // heads-up rounds have at most one winner apiece
        assert!(fred.wins + callie.wins <= report.rounds);
    }

    #[tokio::test]
    async fn single_agent_roster_rejected() {
        let config = config(vec![profile("Solo", Backend::Caller)], 1);
        assert!(Series::new(&config).is_err());
    }
}
