//! Text graph loader.
//!
//! # Format
//!
//! Whitespace-separated, one record per line:
//!
//! ```text
//! vertex count: 2
//! edge count: 1
//! S 0 100 -1 1 10
//! G 5 50 -1 -1 0
//! 0 1 0 0 20 5 -1 0 1 10 4 0
//! num_trains 1
//! ```
//!
//! | Record | Fields                                                              |
//! |--------|---------------------------------------------------------------------|
//! | node   | `name start end id_before id_after buffer_after`                    |
//! | edge   | `from to zeta alpha beta delta id_before unsafe_before id_after max_buffer_after unsafe_after [heuristic]` |
//!
//! Node records are numbered in file order; edge endpoints refer to those
//! numbers.  Negative agent ids mean "no neighbour".  The agent ahead has
//! no buffer capacity field and loads as unbounded.  Times accept `inf`.
//! The trailing `num_trains K` line, when present, sets the agent count to
//! at least `K + 1`.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rp_atf::{EdgeAtf, NeighbouringAgent};
use rp_core::{AgentId, NodeId, SafeInterval};

use crate::{Graph, GraphBuilder, GraphError, GraphResult, NodeNeighbours, State};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a graph from a file.
pub fn load_graph(path: &Path) -> GraphResult<Graph> {
    let file = File::open(path)?;
    load_graph_reader(file)
}

/// Like [`load_graph`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for graphs produced in
/// memory.
pub fn load_graph_reader<R: Read>(reader: R) -> GraphResult<Graph> {
    let csv_reader = csv::ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Rows { inner: csv_reader.into_records(), line: 0 };

    let vertex_count = rows.header("vertex")?;
    let edge_count = rows.header("edge")?;
    let mut builder = GraphBuilder::with_capacity(vertex_count, edge_count);

    for _ in 0..vertex_count {
        let f = rows.expect("node record")?;
        rows.arity(&f, 6, 6, "node record")?;
        let interval = SafeInterval::checked(rows.num(&f[1], "start")?, rows.num(&f[2], "end")?)?;
        let neighbours = NodeNeighbours {
            before: rows.agent(&f[3])?,
            after: rows.agent(&f[4])?,
            buffer_after: rows.num(&f[5], "buffer_after")?,
        };
        for agent in [neighbours.before, neighbours.after] {
            if agent.is_valid() {
                builder.set_agent_count(agent.index() + 1);
            }
        }
        builder.add_node(State::new(f[0].as_str(), interval).with_neighbours(neighbours));
    }

    for _ in 0..edge_count {
        let f = rows.expect("edge record")?;
        rows.arity(&f, 11, 12, "edge record")?;
        let from = NodeId(rows.num(&f[0], "from")?);
        let to = NodeId(rows.num(&f[1], "to")?);
        let atf = EdgeAtf::new(
            rows.num(&f[2], "zeta")?,
            rows.num(&f[3], "alpha")?,
            rows.num(&f[4], "beta")?,
            rows.num(&f[5], "delta")?,
        );
        let before = NeighbouringAgent::new(rows.agent(&f[6])?, f64::INFINITY, rows.num(&f[7], "unsafe_before")?);
        let after = NeighbouringAgent::new(
            rows.agent(&f[8])?,
            rows.num(&f[9], "max_buffer_after")?,
            rows.num(&f[10], "unsafe_after")?,
        );
        let heuristic = match f.get(11) {
            Some(h) => rows.num(h, "heuristic")?,
            None => 0.0,
        };
        builder.add_edge(from, to, atf, before, after, heuristic)?;
    }

    if let Some(f) = rows.next()? {
        if f[0] != "num_trains" || f.len() != 2 {
            return Err(rows.error(format!("expected `num_trains K`, found {:?}", f.join(" "))));
        }
        let k: i64 = rows.num(&f[1], "num_trains")?;
        builder.set_agent_count(usize::try_from(k + 1).unwrap_or(0));
    }

    Ok(builder.build())
}

// ── Record iterator ───────────────────────────────────────────────────────────

struct Rows<R: Read> {
    inner: csv::StringRecordsIntoIter<R>,
    line: u64,
}

impl<R: Read> Rows<R> {
    /// Next non-blank record, with empty fields (runs of spaces) removed.
    fn next(&mut self) -> GraphResult<Option<Vec<String>>> {
        while let Some(rec) = self.inner.next() {
            let rec = rec.map_err(|e| {
                let line = e.position().map_or(self.line + 1, |p| p.line());
                GraphError::Parse { line, message: e.to_string() }
            })?;
            self.line = rec.position().map_or(self.line + 1, |p| p.line());
            let fields: Vec<String> =
                rec.iter().filter(|s| !s.is_empty()).map(str::to_owned).collect();
            if !fields.is_empty() {
                return Ok(Some(fields));
            }
        }
        Ok(None)
    }

    fn expect(&mut self, what: &str) -> GraphResult<Vec<String>> {
        match self.next()? {
            Some(f) => Ok(f),
            None => Err(self.error(format!("unexpected end of input, expected {what}"))),
        }
    }

    /// `<keyword> count: N`
    fn header(&mut self, keyword: &str) -> GraphResult<usize> {
        let f = self.expect(&format!("`{keyword} count: N`"))?;
        if f.len() != 3 || f[0] != keyword || f[1] != "count:" {
            return Err(self.error(format!("expected `{keyword} count: N`, found {:?}", f.join(" "))));
        }
        self.num(&f[2], "count")
    }

    fn arity(&self, f: &[String], min: usize, max: usize, what: &str) -> GraphResult<()> {
        if f.len() < min || f.len() > max {
            return Err(self.error(format!("{what} has {} fields, expected {min}..={max}", f.len())));
        }
        Ok(())
    }

    fn num<T: FromStr>(&self, s: &str, field: &str) -> GraphResult<T> {
        s.parse().map_err(|_| self.error(format!("invalid {field} {s:?}")))
    }

    /// Agent id; negative means none.
    fn agent(&self, s: &str) -> GraphResult<AgentId> {
        let id: i64 = self.num(s, "agent id")?;
        if id < 0 {
            return Ok(AgentId::INVALID);
        }
        u32::try_from(id)
            .map(AgentId)
            .map_err(|_| self.error(format!("agent id {id} out of range")))
    }

    fn error(&self, message: String) -> GraphError {
        GraphError::Parse { line: self.line, message }
    }
}
