use std::collections::{BTreeMap, HashMap};

use crate::error::GenerationError;
use crate::grammar::Grammar;
use crate::item::{Jump, LrItem, State};
use crate::production::Production;
use crate::progress::{Progress, Silent};
use crate::set::Set;
use crate::symbol::{Nonterminal, Symbol, SymbolId, Terminal, END, EPSILON};

/// Defensive bound on the canonical collection. Canonical LR(1) automata
/// for pathological grammars can grow without useful bound; failing fast
/// beats exhausting memory.
pub const MAX_STATES: usize = 10_000;

/// Everything a table consumer needs: the sparse ACTION/GOTO table plus
/// symbol and production metadata. Immutable once the generation run
/// completes.
///
/// Table cells are keyed `state * table_pitch + symbol`; a positive value
/// is a shift to that state, a negative value a reduce by that production,
/// zero the accept action, and an absent key a syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct LrTables {
    pub table: BTreeMap<i32, i32>,
    pub table_pitch: SymbolId,
    pub start_state: usize,
    pub terminals: Vec<TerminalEntry>,
    pub nonterminals: Vec<NonterminalEntry>,
    pub productions: Vec<ProductionEntry>,
    pub states: Vec<State>,
    pub jumps: Vec<Jump>,
}

/// Runtime token-classification data for one terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalEntry {
    pub index: SymbolId,
    pub name: String,
    pub kind: Option<String>,
    pub literal: Option<String>,
}

/// Goto-column metadata for one nonterminal, the augmented start symbol
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct NonterminalEntry {
    pub index: SymbolId,
    pub name: String,
}

/// Reduction metadata for one production, 1-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionEntry {
    pub index: usize,
    pub left: SymbolId,
    pub right_len: usize,
    /// Opaque semantic-action text; `None` means the pass-first-child
    /// default applies.
    pub code: Option<String>,
}

impl LrTables {
    /// Generate the canonical LR(1) tables for `grammar`.
    pub fn generate(grammar: Grammar) -> Result<Self, GenerationError> {
        Self::generate_with_progress(grammar, &mut Silent)
    }

    /// Like [`generate`](Self::generate), announcing each pipeline stage to
    /// `progress`. The stages are order sensitive and always run as
    /// `augment`, `indexes`, `first`, `follow`, `states`, `table`.
    pub fn generate_with_progress(
        grammar: Grammar,
        progress: &mut dyn Progress,
    ) -> Result<Self, GenerationError> {
        progress.stage("augment");
        let mut generator = LrGenerator::augment(grammar)?;
        progress.stage("indexes");
        generator.compute_indexes();
        progress.stage("first");
        generator.compute_first();
        progress.stage("follow");
        generator.compute_follow();
        progress.stage("states");
        generator.compute_states()?;
        progress.stage("table");
        generator.compute_table()?;
        Ok(generator.into_tables())
    }
}

struct LrGenerator {
    grammar: Grammar,
    start_production: Production,
    /// Productions in indexing order; production `i` has index `i + 1`.
    productions: Vec<Production>,
    terminal_ids: HashMap<Terminal, SymbolId>,
    nonterminal_ids: HashMap<Nonterminal, SymbolId>,
    table_pitch: SymbolId,
    /// FIRST and FOLLOW sets per nonterminal index. Terminal FIRST sets
    /// are the singleton of their own index and are never stored.
    first: HashMap<SymbolId, Set<SymbolId>>,
    follow: HashMap<SymbolId, Set<SymbolId>>,
    states: Vec<State>,
    jumps: Vec<Jump>,
    table: BTreeMap<i32, i32>,
}

impl LrGenerator {
    /// Derives the augmented grammar: a fresh start nonterminal, the
    /// production `$start -> old_start` and the reassigned start symbol.
    /// The `$end` terminal enters the terminal set during indexing.
    fn augment(mut grammar: Grammar) -> Result<Self, GenerationError> {
        if grammar
            .productions
            .iter()
            .all(|production| production.left != grammar.start)
        {
            return Err(GenerationError::MissingStartProduction);
        }

        let new_start = Nonterminal::new("$start");
        let start_production = Production::new(
            new_start.clone(),
            vec![Symbol::Nonterminal(grammar.start.clone())],
            None,
        );
        grammar.productions.add(start_production.clone());
        grammar.nonterminals.add(new_start.clone());
        grammar.start = new_start;

        Ok(LrGenerator {
            grammar,
            start_production,
            productions: Vec::new(),
            terminal_ids: HashMap::new(),
            nonterminal_ids: HashMap::new(),
            table_pitch: 0,
            first: HashMap::new(),
            follow: HashMap::new(),
            states: Vec::new(),
            jumps: Vec::new(),
            table: BTreeMap::new(),
        })
    }

    /// Assigns stable indices: terminals `1..=T` in set order, then `$end`
    /// with index 0 appended to the terminal set; nonterminals continue
    /// after the last terminal; productions are 1-based in set order.
    /// Iteration order over the sets is insertion order, so repeated runs
    /// on an unmodified grammar reproduce identical indices.
    fn compute_indexes(&mut self) {
        let mut index: SymbolId = 1;
        for terminal in self.grammar.terminals.iter() {
            self.terminal_ids.insert(terminal.clone(), index);
            index += 1;
        }

        let end = Terminal::reserved("$end");
        self.terminal_ids.insert(end.clone(), END);
        self.grammar.terminals.add(end);

        for nonterminal in self.grammar.nonterminals.iter() {
            self.nonterminal_ids.insert(nonterminal.clone(), index);
            self.first.insert(index, Set::new());
            self.follow.insert(index, Set::new());
            index += 1;
        }

        // The augmented start symbol was registered last, so the highest
        // column of the linearized table never receives a goto.
        self.table_pitch = index - 1;

        self.productions = self.grammar.productions.iter().cloned().collect();
    }

    /// FIRST set of a single symbol: the singleton index for a terminal,
    /// the computed set for a nonterminal.
    fn first_of(&self, symbol: &Symbol) -> Set<SymbolId> {
        match symbol {
            Symbol::Terminal(t) => {
                let mut set = Set::new();
                set.add(self.terminal_ids[t]);
                set
            }
            Symbol::Nonterminal(n) => self.first[&self.nonterminal_ids[n]].clone(),
        }
    }

    /// Fixed-point FIRST computation. Each set only grows and is bounded
    /// by the finite universe of terminal indices plus epsilon, so the
    /// loop terminates.
    fn compute_first(&mut self) {
        for production in &self.productions {
            if production.right.is_empty() {
                let left = self.nonterminal_ids[&production.left];
                self.first
                    .get_mut(&left)
                    .expect("indexed nonterminal")
                    .add(EPSILON);
            }
        }

        loop {
            let mut done = true;
            for production in &self.productions {
                let left = self.nonterminal_ids[&production.left];
                for symbol in &production.right {
                    let symbol_first = self.first_of(symbol);
                    let left_first = self.first.get_mut(&left).expect("indexed nonterminal");
                    for &id in symbol_first.iter() {
                        if id != EPSILON && left_first.add(id) {
                            done = false;
                        }
                    }
                    // Nothing after a non-vanishing symbol contributes.
                    if !symbol_first.contains(&EPSILON) {
                        break;
                    }
                }
            }
            if done {
                break;
            }
        }
    }

    /// Fixed-point FOLLOW computation; requires FIRST to be stable.
    /// FOLLOW sets never contain epsilon.
    fn compute_follow(&mut self) {
        let start = self.nonterminal_ids[&self.grammar.start];
        self.follow
            .get_mut(&start)
            .expect("indexed start symbol")
            .add(END);

        for production in &self.productions {
            for i in 0..production.right.len().saturating_sub(1) {
                let nonterminal = match &production.right[i] {
                    Symbol::Nonterminal(n) => self.nonterminal_ids[n],
                    Symbol::Terminal(_) => continue,
                };
                let next_first = self.first_of(&production.right[i + 1]);
                let follow = self
                    .follow
                    .get_mut(&nonterminal)
                    .expect("indexed nonterminal");
                for &id in next_first.iter() {
                    if id != EPSILON {
                        follow.add(id);
                    }
                }
            }
        }

        loop {
            let mut done = true;
            for production in &self.productions {
                let left = self.nonterminal_ids[&production.left];
                for i in 0..production.right.len() {
                    let nonterminal = match &production.right[i] {
                        Symbol::Nonterminal(n) => self.nonterminal_ids[n],
                        Symbol::Terminal(_) => continue,
                    };

                    let vanishing_tail = production.right[i + 1..]
                        .iter()
                        .all(|symbol| self.first_of(symbol).contains(&EPSILON));
                    if !vanishing_tail {
                        continue;
                    }

                    let left_follow = self.follow[&left].clone();
                    let follow = self
                        .follow
                        .get_mut(&nonterminal)
                        .expect("indexed nonterminal");
                    if follow.add_all(&left_follow) {
                        done = false;
                    }
                }
            }
            if done {
                break;
            }
        }
    }

    /// Lookaheads for the items introduced by expanding `B` in
    /// `[A -> alpha . B beta, la]`: FIRST(beta la) restricted to
    /// terminals. When beta is empty or fully vanishing the item's own
    /// lookahead takes over.
    fn lookaheads(&self, beta: &[Symbol], lookahead: SymbolId) -> Set<SymbolId> {
        let mut result = Set::new();
        let mut vanishing = true;
        for symbol in beta {
            let first = self.first_of(symbol);
            for &id in first.iter() {
                if id != EPSILON {
                    result.add(id);
                }
            }
            if !first.contains(&EPSILON) {
                vanishing = false;
                break;
            }
        }
        if vanishing || result.is_empty() {
            result.add(lookahead);
        }
        result
    }

    /// Closure of an item set: keeps expanding nonterminals after the dot
    /// until no new item appears. The universe of (production, dot,
    /// lookahead) triples is finite, so the worklist drains.
    fn closure(&self, mut items: State) -> State {
        let mut i = 0;
        while i < items.len() {
            let item = items.get(i).cloned().expect("index in range");
            i += 1;

            let expanded = match item.next_symbol() {
                Some(Symbol::Nonterminal(n)) => n.clone(),
                _ => continue,
            };
            let lookaheads = self.lookaheads(&item.after_dot()[1..], item.lookahead);

            for production in &self.productions {
                if production.left == expanded {
                    for &lookahead in lookaheads.iter() {
                        items.add(LrItem::new(production.clone(), 0, lookahead));
                    }
                }
            }
        }
        items
    }

    /// Advances the dot past `symbol` for every item that allows it and
    /// closes the result. An empty result means no transition on `symbol`.
    fn jump(&self, state: &State, symbol: &Symbol) -> State {
        let mut advanced = State::new();
        for item in state.iter() {
            if item.next_symbol() == Some(symbol) {
                advanced.add(item.advanced());
            }
        }
        if advanced.is_empty() {
            advanced
        } else {
            self.closure(advanced)
        }
    }

    /// Builds the canonical collection: a worklist over states, each new
    /// jump target either matched against a structurally equal known state
    /// or appended as a fresh one. Every transition is recorded as a
    /// `Jump` by state index; targets are registered before the jump
    /// referencing them.
    fn compute_states(&mut self) -> Result<(), GenerationError> {
        let mut initial = State::new();
        initial.add(LrItem::new(self.start_production.clone(), 0, END));
        let initial = self.closure(initial);
        self.states.push(initial);

        let symbols: Vec<Symbol> = self
            .grammar
            .nonterminals
            .iter()
            .cloned()
            .map(Symbol::Nonterminal)
            .chain(
                self.grammar
                    .terminals
                    .iter()
                    .cloned()
                    .map(Symbol::Terminal),
            )
            .collect();

        let mut i = 0;
        while i < self.states.len() {
            for symbol in &symbols {
                let target = self.jump(&self.states[i], symbol);
                if target.is_empty() {
                    continue;
                }

                let to = match self.states.iter().position(|state| *state == target) {
                    Some(known) => known,
                    None => {
                        if self.states.len() >= MAX_STATES {
                            return Err(GenerationError::TooManyStates { limit: MAX_STATES });
                        }
                        self.states.push(target);
                        self.states.len() - 1
                    }
                };

                self.jumps.push(Jump {
                    from: i,
                    symbol: symbol.clone(),
                    to,
                });
            }
            i += 1;
        }

        Ok(())
    }

    fn next_state(&self, from: usize, symbol: &Symbol) -> Option<usize> {
        self.jumps
            .iter()
            .find(|jump| jump.from == from && jump.symbol == *symbol)
            .map(|jump| jump.to)
    }

    fn production_index(&self, production: &Production) -> usize {
        self.productions
            .iter()
            .position(|p| p == production)
            .expect("production registered during indexing")
            + 1
    }

    /// Walks every state and fills the ACTION/GOTO table, rejecting the
    /// grammar on the first conflicting cell.
    fn compute_table(&mut self) -> Result<(), GenerationError> {
        for state in 0..self.states.len() {
            // Shifts.
            for terminal in self.grammar.terminals.iter() {
                let symbol = Symbol::Terminal(terminal.clone());
                let wants_shift = self.states[state]
                    .iter()
                    .any(|item| item.next_symbol() == Some(&symbol));
                if !wants_shift {
                    continue;
                }

                let target = self.next_state(state, &symbol).ok_or_else(|| {
                    GenerationError::MissingShiftTarget {
                        state,
                        symbol: symbol.to_string(),
                    }
                })?;
                let key = state as i32 * self.table_pitch + self.terminal_ids[terminal];
                self.table.insert(key, target as i32);
            }

            // Reduces and the accept action.
            let mut reductions: Vec<(i32, i32, LrItem)> = Vec::new();
            for item in self.states[state].iter() {
                if !item.is_complete() {
                    continue;
                }
                let key = state as i32 * self.table_pitch + item.lookahead;

                if item.production == self.start_production {
                    reductions.push((key, 0, item.clone()));
                    continue;
                }

                let candidate = self.production_index(&item.production);
                reductions.push((key, -(candidate as i32), item.clone()));
            }
            for (key, action, item) in reductions {
                if action == 0 {
                    self.table.insert(key, 0);
                    continue;
                }
                if let Some(&existing) = self.table.get(&key) {
                    if existing > 0 {
                        return Err(GenerationError::ShiftReduceConflict {
                            state,
                            item,
                            shift_state: existing as usize,
                        });
                    } else if existing < 0 {
                        return Err(GenerationError::ReduceReduceConflict {
                            state,
                            item,
                            existing: (-existing) as usize,
                            candidate: (-action) as usize,
                        });
                    } else {
                        return Err(GenerationError::AcceptReduceConflict { state, item });
                    }
                }
                self.table.insert(key, action);
            }

            // Gotos; absence is not an error, it simply means no valid
            // continuation exists and the driver reports a parse error.
            for nonterminal in self.grammar.nonterminals.iter() {
                let symbol = Symbol::Nonterminal(nonterminal.clone());
                if let Some(target) = self.next_state(state, &symbol) {
                    let key = state as i32 * self.table_pitch + self.nonterminal_ids[nonterminal];
                    self.table.insert(key, target as i32);
                }
            }
        }

        Ok(())
    }

    fn into_tables(self) -> LrTables {
        let terminals = self
            .grammar
            .terminals
            .iter()
            .map(|terminal| TerminalEntry {
                index: self.terminal_ids[terminal],
                name: terminal.name.clone(),
                kind: terminal.kind.clone(),
                literal: terminal.literal.clone(),
            })
            .collect();

        let nonterminals = self
            .grammar
            .nonterminals
            .iter()
            .map(|nonterminal| NonterminalEntry {
                index: self.nonterminal_ids[nonterminal],
                name: nonterminal.name.clone(),
            })
            .collect();

        let productions = self
            .productions
            .iter()
            .enumerate()
            .map(|(i, production)| ProductionEntry {
                index: i + 1,
                left: self.nonterminal_ids[&production.left],
                right_len: production.right.len(),
                code: production.code.clone(),
            })
            .collect();

        LrTables {
            table: self.table,
            table_pitch: self.table_pitch,
            start_state: 0,
            terminals,
            nonterminals,
            productions,
            states: self.states,
            jumps: self.jumps,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use matches::assert_matches;

    /// Builds a grammar from `(name, rhs, code)` rules. Right-hand-side
    /// entries naming a rule become nonterminals, ALL-CAPS entries become
    /// kind-matched terminals and everything else a literal terminal.
    fn build(start: &str, rules: &[(&str, &[&str], Option<&str>)]) -> Grammar {
        let rule_names: Vec<&str> = rules.iter().map(|rule| rule.0).collect();
        let mut terminals = Set::new();
        let mut nonterminals = Set::new();
        let mut productions = Set::new();

        for name in &rule_names {
            nonterminals.add(Nonterminal::new(*name));
        }
        for (name, rhs, code) in rules {
            let right = rhs
                .iter()
                .map(|entry| {
                    if rule_names.contains(entry) {
                        Symbol::Nonterminal(Nonterminal::new(*entry))
                    } else if entry.chars().all(|c| c.is_ascii_uppercase()) {
                        let terminal = Terminal::kind(*entry);
                        terminals.add(terminal.clone());
                        Symbol::Terminal(terminal)
                    } else {
                        let terminal = Terminal::literal(*entry);
                        terminals.add(terminal.clone());
                        Symbol::Terminal(terminal)
                    }
                })
                .collect();
            productions.add(Production::new(
                Nonterminal::new(*name),
                right,
                code.map(str::to_owned),
            ));
        }

        Grammar::new(
            "test",
            terminals,
            nonterminals,
            productions,
            Nonterminal::new(start),
        )
    }

    fn expression_grammar() -> Grammar {
        build(
            "e",
            &[
                ("e", &["e", "+", "t"], None),
                ("e", &["t"], None),
                ("t", &["NUM"], None),
            ],
        )
    }

    fn stages(grammar: Grammar) -> LrGenerator {
        let mut generator = LrGenerator::augment(grammar).unwrap();
        generator.compute_indexes();
        generator.compute_first();
        generator.compute_follow();
        generator
    }

    #[test]
    fn terminal_first_set_is_its_own_index() {
        let generator = stages(expression_grammar());
        let plus = Terminal::literal("+");
        let first = generator.first_of(&Symbol::Terminal(plus.clone()));
        assert_eq!(first.len(), 1);
        assert!(first.contains(&generator.terminal_ids[&plus]));
    }

    #[test]
    fn first_and_follow_with_epsilon_production() {
        // s -> a B ; a -> | A
        let generator = stages(build(
            "s",
            &[
                ("s", &["a", "B"], None),
                ("a", &[], None),
                ("a", &["A"], None),
            ],
        ));

        let a_id = generator.nonterminal_ids[&Nonterminal::new("a")];
        let s_id = generator.nonterminal_ids[&Nonterminal::new("s")];
        let terminal_a = generator.terminal_ids[&Terminal::kind("A")];
        let terminal_b = generator.terminal_ids[&Terminal::kind("B")];

        let first_a = &generator.first[&a_id];
        assert!(first_a.contains(&terminal_a));
        assert!(first_a.contains(&EPSILON));

        // `a` vanishes, so FIRST(s) pulls in B as well.
        let first_s = &generator.first[&s_id];
        assert!(first_s.contains(&terminal_a));
        assert!(first_s.contains(&terminal_b));
        assert!(!first_s.contains(&EPSILON));

        let follow_a = &generator.follow[&a_id];
        assert!(follow_a.contains(&terminal_b));
        assert!(!follow_a.contains(&EPSILON));
        assert!(generator.follow[&s_id].contains(&END));
    }

    #[test]
    fn follow_propagates_through_vanishing_tail() {
        // s -> A b a ; b -> B ; a -> | A: FOLLOW(b) must pick up
        // everything in FOLLOW(s) because `a` can vanish.
        let generator = stages(build(
            "s",
            &[
                ("s", &["A", "b", "a"], None),
                ("b", &["B"], None),
                ("a", &[], None),
                ("a", &["A"], None),
            ],
        ));
        let b_id = generator.nonterminal_ids[&Nonterminal::new("b")];
        assert!(generator.follow[&b_id].contains(&END));
    }

    #[test]
    fn closure_is_idempotent() {
        let generator = stages(expression_grammar());
        let mut initial = State::new();
        initial.add(LrItem::new(generator.start_production.clone(), 0, END));
        let once = generator.closure(initial);
        let twice = generator.closure(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn jump_relation_is_a_partial_function() {
        let mut generator = stages(expression_grammar());
        generator.compute_states().unwrap();
        for jump in &generator.jumps {
            let targets: Vec<usize> = generator
                .jumps
                .iter()
                .filter(|j| j.from == jump.from && j.symbol == jump.symbol)
                .map(|j| j.to)
                .collect();
            assert_eq!(targets.len(), 1);
        }
    }

    #[test]
    fn states_are_deduplicated() {
        let mut generator = stages(expression_grammar());
        generator.compute_states().unwrap();
        for (i, state) in generator.states.iter().enumerate() {
            for other in generator.states.iter().skip(i + 1) {
                assert_ne!(state, other);
            }
        }
        for jump in &generator.jumps {
            assert!(jump.to < generator.states.len());
        }
    }

    #[test]
    fn expression_grammar_builds_a_table_with_one_accept() {
        let tables = LrTables::generate(expression_grammar()).unwrap();
        assert_eq!(tables.start_state, 0);
        let accepts = tables.table.values().filter(|&&a| a == 0).count();
        assert_eq!(accepts, 1);
        // Three user productions plus the augmented start production.
        assert_eq!(tables.productions.len(), 4);
        assert!(tables.table.values().any(|&a| a < 0));
    }

    #[test]
    fn generation_is_deterministic() {
        let first = LrTables::generate(expression_grammar()).unwrap();
        let second = LrTables::generate(expression_grammar()).unwrap();
        assert_eq!(first.table_pitch, second.table_pitch);
        assert_eq!(first.states.len(), second.states.len());
        assert_eq!(first.table, second.table);
    }

    #[test]
    fn ambiguous_grammar_is_rejected_with_both_productions() {
        // s -> a | b ; a -> 'x' ; b -> 'x'
        let grammar = build(
            "s",
            &[
                ("s", &["a"], None),
                ("s", &["b"], None),
                ("a", &["x"], None),
                ("b", &["x"], None),
            ],
        );
        let error = LrTables::generate(grammar).unwrap_err();
        match error {
            GenerationError::ReduceReduceConflict {
                existing,
                candidate,
                ..
            } => {
                // Productions 3 (`a -> x`) and 4 (`b -> x`) compete.
                let mut pair = vec![existing, candidate];
                pair.sort();
                assert_eq!(pair, vec![3, 4]);
            }
            other => panic!("expected reduce-reduce conflict, got {}", other),
        }
    }

    #[test]
    fn missing_start_production_is_rejected() {
        let grammar = build("s", &[("a", &["A"], None)]);
        let error = LrTables::generate(grammar).unwrap_err();
        assert_matches!(error, GenerationError::MissingStartProduction);
    }

    #[test]
    fn left_recursive_list_grammar_has_no_conflicts() {
        let grammar = build(
            "l",
            &[("l", &["l", ",", "ID"], None), ("l", &["ID"], None)],
        );
        let tables = LrTables::generate(grammar).unwrap();
        assert!(tables.table.values().any(|&a| a == 0));
    }
}
