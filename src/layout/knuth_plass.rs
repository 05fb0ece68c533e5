use super::items::{Item, PenaltyCost, Sum};
use id_arena::{Arena, Id};

/// Weights added to a line's demerits, in the units of squared badness
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Demerits {
    /// Added to every line's badness before squaring, so fewer lines are preferred
    pub line: f64,
    /// Added when two consecutive lines both end at flagged penalties
    pub flagged: f64,
    /// Added when two consecutive lines are more than one fitness class apart
    pub fitness: f64,
}

impl Default for Demerits {
    fn default() -> Self {
        Demerits {
            line: 10.0,
            flagged: 100.0,
            fitness: 3000.0,
        }
    }
}

/// How tightly or loosely a line's glue is set, bucketed from its adjustment ratio
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FitnessClass {
    /// Shrunk by more than half the available shrink
    Tight = 0,
    Normal = 1,
    /// Stretched by more than half the available stretch
    Loose = 2,
    /// Stretched past the available stretch
    VeryLoose = 3,
}

impl FitnessClass {
    pub fn from_ratio(ratio: f32) -> FitnessClass {
        if ratio < -0.5 {
            FitnessClass::Tight
        } else if ratio <= 0.5 {
            FitnessClass::Normal
        } else if ratio <= 1.0 {
            FitnessClass::Loose
        } else {
            FitnessClass::VeryLoose
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> FitnessClass {
        match index {
            0 => FitnessClass::Tight,
            1 => FitnessClass::Normal,
            2 => FitnessClass::Loose,
            _ => FitnessClass::VeryLoose,
        }
    }
}

/// One chosen line break: the line ending at item `position` is set with
/// adjustment `ratio`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Break {
    pub position: usize,
    pub ratio: f32,
    /// 1-based number of the line this break ends
    pub line: usize,
}

/// A feasible break found during the search. The chain of `previous` links
/// always ends at the root breakpoint (position 0, line 0).
#[derive(Debug, Clone)]
struct Breakpoint {
    position: usize,
    demerits: f64,
    ratio: f32,
    line: usize,
    fitness: FitnessClass,
    flagged: bool,
    totals: Sum,
    previous: Option<Id<Breakpoint>>,
}

/// The cheapest way found so far to reach the current item from one active
/// breakpoint, within a single fitness class
#[derive(Debug, Copy, Clone)]
struct Candidate {
    parent: Id<Breakpoint>,
    demerits: f64,
    ratio: f32,
}

/// The arena a search allocated and the cheapest breakpoint that ends it
struct Chain {
    arena: Arena<Breakpoint>,
    best: Id<Breakpoint>,
}

/// Optimal line breaking over a sequence of items, after Knuth and Plass.
///
/// The search scans the items once, keeping a list of *active* breakpoints:
/// breaks from which a line could still reach the current item without
/// overflowing. At every legal break (glue that follows a box, or a penalty
/// that isn't forbidden) each active breakpoint is tried as the start of a
/// line ending here; feasible lines become new breakpoints, at most one per
/// fitness class and line number. Breakpoints whose lines can no longer fit
/// are dropped, as is every breakpoint once a forced break is passed.
///
/// When the scan is done the cheapest surviving breakpoint is followed back to
/// the start of the paragraph to give the chosen breaks.
///
/// # Line widths
///
/// Line `n` (1-based) is set to `line_widths[n - 1]`; lines past the end of the
/// slice reuse its last width.
///
/// # Example
///
/// ```
/// use glyph_layout::layout::{paragraph_items, KnuthPlass, SpaceGlue};
/// use glyph_layout::MonospaceMetrics;
///
/// let metrics = MonospaceMetrics(1.0);
/// let items = paragraph_items("aaa bbb ccc ddd", &metrics, SpaceGlue::from_metrics(&metrics));
/// let breaks = KnuthPlass::new(&items, &[7.0]).run();
/// assert_eq!(breaks.len(), 2);
/// assert_eq!(breaks[0].position, 3);
/// ```
pub struct KnuthPlass<'i, 'a> {
    items: &'i [Item<'a>],
    line_widths: &'i [f32],
    tolerance: f32,
    demerits: Demerits,
}

impl<'i, 'a> KnuthPlass<'i, 'a> {
    /// Create a search with a tolerance of 2 and the default [Demerits]
    pub fn new(items: &'i [Item<'a>], line_widths: &'i [f32]) -> KnuthPlass<'i, 'a> {
        KnuthPlass {
            items,
            line_widths,
            tolerance: 2.0,
            demerits: Demerits::default(),
        }
    }

    /// The largest adjustment ratio a line may be set with
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_demerits(mut self, demerits: Demerits) -> Self {
        self.demerits = demerits;
        self
    }

    /// Find the breaks with the fewest total demerits, in paragraph order.
    ///
    /// Returns an empty list when no set of breaks keeps every line within
    /// tolerance.
    pub fn run(&self) -> Vec<Break> {
        let Some(Chain { arena, best }) = self.search() else {
            return Vec::new();
        };

        let mut breaks: Vec<Break> = Vec::new();
        let mut cursor = Some(best);
        while let Some(id) = cursor {
            let breakpoint = &arena[id];
            if breakpoint.previous.is_none() {
                break;
            }
            breaks.push(Break {
                position: breakpoint.position,
                ratio: breakpoint.ratio,
                line: breakpoint.line,
            });
            cursor = breakpoint.previous;
        }
        breaks.reverse();
        breaks
    }

    fn search(&self) -> Option<Chain> {
        if self.line_widths.is_empty() {
            return None;
        }

        let mut arena: Arena<Breakpoint> = Arena::new();
        let root = arena.alloc(Breakpoint {
            position: 0,
            demerits: 0.0,
            ratio: 0.0,
            line: 0,
            fitness: FitnessClass::Tight,
            flagged: false,
            totals: Sum::default(),
            previous: None,
        });
        let mut active: Vec<Id<Breakpoint>> = vec![root];
        let mut sum = Sum::default();

        for (index, item) in self.items.iter().enumerate() {
            match item {
                Item::Box { width, .. } => sum.width += *width,
                Item::Glue { .. } => {
                    if index > 0 && self.items[index - 1].is_box() {
                        self.try_break_at(index, sum, &mut arena, &mut active);
                    }
                    sum += Sum::of(item);
                }
                Item::Penalty { cost, .. } => {
                    if *cost != PenaltyCost::Forbidden {
                        self.try_break_at(index, sum, &mut arena, &mut active);
                    }
                }
            }

            if active.is_empty() {
                log::debug!(
                    "no feasible breaks past item {index} of {} at tolerance {}",
                    self.items.len(),
                    self.tolerance
                );
                return None;
            }
        }

        let best = active
            .iter()
            .copied()
            .min_by(|&a, &b| arena[a].demerits.total_cmp(&arena[b].demerits))?;
        log::debug!(
            "chose {} lines with {} demerits out of {} breakpoints",
            arena[best].line,
            arena[best].demerits,
            arena.len()
        );
        Some(Chain { arena, best })
    }

    /// Try every active breakpoint as the start of a line that ends at item
    /// `index`, one group of equal line numbers at a time, and insert the
    /// resulting breakpoints after the group they descend from
    fn try_break_at(
        &self,
        index: usize,
        sum: Sum,
        arena: &mut Arena<Breakpoint>,
        active: &mut Vec<Id<Breakpoint>>,
    ) {
        let item = &self.items[index];
        let (penalty_width, penalty_cost) = match *item {
            Item::Penalty { width, cost, .. } => (width, Some(cost)),
            _ => (0.0, None),
        };
        let forced = item.is_forced_break();

        let mut i = 0;
        while i < active.len() {
            let mut candidates: [Option<Candidate>; 4] = [None; 4];

            while i < active.len() {
                let parent_id = active[i];
                let parent = &arena[parent_id];
                let line = parent.line + 1;

                let mut delta = sum - parent.totals;
                delta.width += penalty_width;
                let ratio = self.adjustment_ratio(delta, line);

                if (-1.0..=self.tolerance).contains(&ratio) {
                    let class = FitnessClass::from_ratio(ratio);
                    let mut demerits = self.line_demerits(ratio, penalty_cost);
                    if item.is_flagged() && parent.flagged {
                        demerits += self.demerits.flagged;
                    }
                    if class.index().abs_diff(parent.fitness.index()) > 1 {
                        demerits += self.demerits.fitness;
                    }
                    demerits += parent.demerits;

                    let slot = &mut candidates[class.index()];
                    if slot.map_or(true, |best| demerits < best.demerits) {
                        *slot = Some(Candidate {
                            parent: parent_id,
                            demerits,
                            ratio,
                        });
                    }
                }

                if ratio < -1.0 || forced {
                    active.remove(i);
                } else {
                    i += 1;
                }

                if i < active.len() && arena[active[i]].line >= line {
                    break;
                }
            }

            if candidates.iter().all(Option::is_none) {
                continue;
            }

            let totals = self.totals_after_break(index, sum);
            for (class, candidate) in candidates.iter().enumerate() {
                let Some(candidate) = candidate else {
                    continue;
                };
                let line = arena[candidate.parent].line + 1;
                let id = arena.alloc(Breakpoint {
                    position: index,
                    demerits: candidate.demerits,
                    ratio: candidate.ratio,
                    line,
                    fitness: FitnessClass::from_index(class),
                    flagged: item.is_flagged(),
                    totals,
                    previous: Some(candidate.parent),
                });
                log::trace!(
                    "breakpoint at item {index}: line {line}, ratio {}, demerits {}",
                    candidate.ratio,
                    candidate.demerits
                );
                active.insert(i, id);
                i += 1;
            }
        }
    }

    fn line_width(&self, line: usize) -> f32 {
        self.line_widths
            .get(line.saturating_sub(1))
            .or(self.line_widths.last())
            .copied()
            .unwrap_or_default()
    }

    /// How far the glue in `delta` has to stretch (positive) or shrink
    /// (negative) to set the line at its target width
    fn adjustment_ratio(&self, delta: Sum, line: usize) -> f32 {
        let target = self.line_width(line);
        if delta.width < target {
            if delta.stretch > 0.0 {
                (target - delta.width) / delta.stretch
            } else {
                f32::INFINITY
            }
        } else if delta.width > target {
            if delta.shrink > 0.0 {
                (target - delta.width) / delta.shrink
            } else {
                f32::NEG_INFINITY
            }
        } else {
            0.0
        }
    }

    fn line_demerits(&self, ratio: f32, penalty: Option<PenaltyCost>) -> f64 {
        let badness = 100.0 * f64::from(ratio.abs()).powi(3);
        let base = (self.demerits.line + badness).powi(2);
        match penalty {
            Some(PenaltyCost::Finite(cost)) if cost >= 0.0 => base + f64::from(cost).powi(2),
            Some(PenaltyCost::Finite(cost)) => base - f64::from(cost).powi(2),
            _ => base,
        }
    }

    /// The running sum as seen by the line that starts after a break at
    /// `index`: glue following the break is discarded up to the next box or
    /// forced break
    fn totals_after_break(&self, index: usize, sum: Sum) -> Sum {
        let mut totals = sum;
        for (i, item) in self.items.iter().enumerate().skip(index) {
            match item {
                Item::Glue { .. } => totals += Sum::of(item),
                Item::Box { .. } => break,
                Item::Penalty { .. } if item.is_forced_break() && i > index => break,
                Item::Penalty { .. } => {}
            }
        }
        totals
    }
}
