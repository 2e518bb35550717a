//! Field-of-view via recursive shadowcasting over the floor's opacity map.
//! Slopes are exact integer vectors compared by cross-multiplication, and the
//! top and bottom bounds are bevelled so walls read as chamfered corners.

use serde::{Deserialize, Serialize};

use crate::floor::Floor;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Unseen,
    Visible,
    /// Seen on an earlier turn but not right now.
    Revealed,
}

/// Per-turn tri-state snapshot, row-major like the floor it was computed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityMap {
    width: usize,
    height: usize,
    cells: Vec<Visibility>,
}

impl VisibilityMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Visibility] {
        &self.cells
    }

    pub fn get(&self, pos: Pos) -> Visibility {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return Visibility::Unseen;
        }
        self.cells[pos.y as usize * self.width + pos.x as usize]
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.get(pos) == Visibility::Visible
    }

    pub fn visible_mask(&self) -> Vec<bool> {
        self.cells.iter().map(|&cell| cell == Visibility::Visible).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Visibility::Visible).count()
    }
}

/// Computes what `origin` sees within Euclidean `range` (negative means
/// unlimited). Cells the floor already remembers come back as `Revealed`;
/// the floor's memory itself is left for the caller to update.
pub fn compute_fov(origin: Pos, range: i32, floor: &Floor) -> VisibilityMap {
    let width = floor.width();
    let height = floor.height();
    let mut scan = OctantScan {
        floor,
        origin,
        range,
        depth_limit: if range < 0 { width.max(height) as i32 } else { range },
        visible: vec![false; width * height],
        octant: 0,
    };
    scan.mark(origin);
    for octant in 0..8 {
        scan.octant = octant;
        scan.compute(1, Slope::new(1, 1), Slope::new(0, 1));
    }

    let cells = scan
        .visible
        .iter()
        .zip(floor.revealed())
        .map(|(&visible, &revealed)| match (visible, revealed) {
            (true, _) => Visibility::Visible,
            (false, true) => Visibility::Revealed,
            (false, false) => Visibility::Unseen,
        })
        .collect();
    VisibilityMap { width, height, cells }
}

/// Direction vector `y / x` from the origin.
#[derive(Clone, Copy, Debug)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater(self, y: i32, x: i32) -> bool {
        self.y * x > self.x * y
    }

    fn greater_or_equal(self, y: i32, x: i32) -> bool {
        self.y * x >= self.x * y
    }

    fn less_or_equal(self, y: i32, x: i32) -> bool {
        self.y * x <= self.x * y
    }
}

struct OctantScan<'a> {
    floor: &'a Floor,
    origin: Pos,
    range: i32,
    depth_limit: i32,
    visible: Vec<bool>,
    octant: u8,
}

impl OctantScan<'_> {
    /// Maps octant-local `(depth, lateral)` onto the grid.
    fn transform(&self, x: i32, y: i32) -> Pos {
        let orig = self.origin;
        match self.octant {
            0 => Pos { y: orig.y - y, x: orig.x + x },
            1 => Pos { y: orig.y - x, x: orig.x + y },
            2 => Pos { y: orig.y - x, x: orig.x - y },
            3 => Pos { y: orig.y - y, x: orig.x - x },
            4 => Pos { y: orig.y + y, x: orig.x - x },
            5 => Pos { y: orig.y + x, x: orig.x - y },
            6 => Pos { y: orig.y + x, x: orig.x + y },
            _ => Pos { y: orig.y + y, x: orig.x + x },
        }
    }

    fn blocks(&self, x: i32, y: i32) -> bool {
        self.floor.blocks_sight(self.transform(x, y))
    }

    fn mark(&mut self, pos: Pos) {
        if self.floor.in_bounds(pos) {
            let idx = self.floor.index(pos);
            self.visible[idx] = true;
        }
    }

    fn in_range(&self, x: i32, y: i32) -> bool {
        self.range < 0 || x * x + y * y <= self.range * self.range
    }

    fn top_y(&self, x: i32, top: Slope) -> i32 {
        if top.x == 1 {
            return x;
        }
        let mut top_y = ((2 * x - 1) * top.y + top.x) / (2 * top.x);
        if self.blocks(x, top_y) {
            if top.greater_or_equal(2 * top_y + 1, 2 * x) && !self.blocks(x, top_y + 1) {
                top_y += 1;
            }
        } else {
            let mut ax = 2 * x;
            if self.blocks(x + 1, top_y + 1) {
                ax += 1;
            }
            if top.greater(2 * top_y + 1, ax) {
                top_y += 1;
            }
        }
        top_y
    }

    fn bottom_y(&self, x: i32, bottom: Slope) -> i32 {
        if bottom.y == 0 {
            return 0;
        }
        let mut bottom_y = ((2 * x - 1) * bottom.y + bottom.x) / (2 * bottom.x);
        if bottom.greater_or_equal(2 * bottom_y + 1, 2 * x)
            && self.blocks(x, bottom_y)
            && !self.blocks(x, bottom_y + 1)
        {
            bottom_y += 1;
        }
        bottom_y
    }

    fn compute(&mut self, start_x: i32, mut top: Slope, mut bottom: Slope) {
        let mut x = start_x;
        while x <= self.depth_limit {
            let top_y = self.top_y(x, top);
            let bottom_y = self.bottom_y(x, bottom);

            // None until the first in-range cell of the column is classified.
            let mut was_opaque: Option<bool> = None;
            let mut y = top_y;
            while y >= bottom_y {
                if self.in_range(x, y) {
                    let opaque = self.blocks(x, y);
                    let visible = (y != top_y || top.greater_or_equal(y, x))
                        && (y != bottom_y || bottom.less_or_equal(y, x));
                    if visible {
                        let pos = self.transform(x, y);
                        self.mark(pos);
                    }

                    if x != self.depth_limit {
                        if opaque {
                            if was_opaque == Some(false) {
                                let edge = Slope::new(2 * y + 1, 2 * x);
                                if top.greater(edge.y, edge.x) {
                                    if y == bottom_y {
                                        bottom = edge;
                                        break;
                                    }
                                    self.compute(x + 1, top, edge);
                                } else if y == bottom_y {
                                    return;
                                }
                            }
                            was_opaque = Some(true);
                        } else {
                            if was_opaque == Some(true) {
                                let edge = Slope::new(2 * y + 1, 2 * x);
                                if bottom.greater_or_equal(edge.y, edge.x) {
                                    return;
                                }
                                top = edge;
                            }
                            was_opaque = Some(false);
                        }
                    }
                }
                y -= 1;
            }

            if was_opaque != Some(false) {
                break;
            }
            x += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::game::line_offsets;
    use crate::game::test_support::{floor_from_rows, open_floor};

    const WALLED_SIDE: usize = 20;

    /// Border-ringed floor with `interior[i]` marking interior walls row by row.
    fn walled_floor(interior: &[bool]) -> Floor {
        let inner = WALLED_SIDE - 2;
        let rows: Vec<String> = (0..WALLED_SIDE)
            .map(|y| {
                (0..WALLED_SIDE)
                    .map(|x| {
                        let edge = y == 0 || x == 0 || y == WALLED_SIDE - 1 || x == WALLED_SIDE - 1;
                        if edge || interior[(y - 1) * inner + (x - 1)] { '#' } else { '.' }
                    })
                    .collect()
            })
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        floor_from_rows(&rows)
    }

    /// No wall strictly between `from` and `to` on the traced line.
    fn clear_line(floor: &Floor, from: Pos, to: Pos) -> bool {
        let path = line_offsets(Pos { y: to.y - from.y, x: to.x - from.x });
        let inner = &path[1..path.len() - 1];
        inner.iter().all(|step| !floor.blocks_sight(from.offset(step.y, step.x)))
    }

    #[test]
    fn origin_is_always_visible() {
        let floor = floor_from_rows(&["###", "#.#", "###"]);
        let map = compute_fov(Pos { y: 1, x: 1 }, 8, &floor);
        assert!(map.is_visible(Pos { y: 1, x: 1 }));
        // Enclosing walls are seen, nothing else exists.
        assert_eq!(map.visible_count(), 9);
    }

    #[test]
    fn single_wall_shadows_cells_behind_it_on_its_ray() {
        let mut rows = vec![String::from("###############")];
        for _ in 0..13 {
            rows.push(String::from("#.............#"));
        }
        rows.push(String::from("###############"));
        // Wall at y=7, x=5, directly south of the origin.
        rows[7].replace_range(5..6, "#");
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let floor = floor_from_rows(&refs);
        let origin = Pos { y: 5, x: 5 };
        let map = compute_fov(origin, 8, &floor);

        assert!(map.is_visible(Pos { y: 7, x: 5 }), "the wall itself is visible");
        assert!(!map.is_visible(Pos { y: 8, x: 5 }));
        assert!(!map.is_visible(Pos { y: 9, x: 5 }));
        assert!(!map.is_visible(Pos { y: 12, x: 5 }));
        // Same distance, off the blocked ray.
        assert!(map.is_visible(Pos { y: 5, x: 8 }));
        assert!(map.is_visible(Pos { y: 5, x: 2 }));
        assert!(map.is_visible(Pos { y: 2, x: 5 }));
    }

    #[test]
    fn range_gate_is_euclidean() {
        let floor = open_floor(30, 30);
        let origin = Pos { y: 15, x: 15 };
        let map = compute_fov(origin, 5, &floor);
        assert!(map.is_visible(Pos { y: 15, x: 20 }));
        assert!(map.is_visible(Pos { y: 18, x: 19 }));
        assert!(!map.is_visible(Pos { y: 19, x: 19 }));
        assert!(!map.is_visible(Pos { y: 15, x: 21 }));
    }

    #[test]
    fn unlimited_range_reaches_far_corners() {
        let floor = open_floor(40, 12);
        let map = compute_fov(Pos { y: 6, x: 3 }, -1, &floor);
        assert!(map.is_visible(Pos { y: 10, x: 38 }));
        assert!(map.is_visible(Pos { y: 10, x: 39 }), "far border wall");
    }

    #[test]
    fn remembered_cells_come_back_as_revealed() {
        let mut floor = floor_from_rows(&["#######", "#..#..#", "#######"]);
        let left = compute_fov(Pos { y: 1, x: 1 }, 8, &floor);
        floor.update_revealed(&left.visible_mask());
        let right = compute_fov(Pos { y: 1, x: 5 }, 8, &floor);
        assert_eq!(right.get(Pos { y: 1, x: 1 }), Visibility::Revealed);
        assert_eq!(right.get(Pos { y: 1, x: 5 }), Visibility::Visible);
        assert_eq!(right.get(Pos { y: 1, x: 2 }), Visibility::Revealed);
    }

    #[test]
    fn fov_is_deterministic() {
        let floor = floor_from_rows(&[
            "##########",
            "#....#...#",
            "#.##.#.#.#",
            "#........#",
            "#.#..##..#",
            "##########",
        ]);
        let first = compute_fov(Pos { y: 3, x: 4 }, 6, &floor);
        let second = compute_fov(Pos { y: 3, x: 4 }, 6, &floor);
        assert_eq!(first, second);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn open_room_visibility_is_symmetric(
            ay in 10_i32..20, ax in 10_i32..20, by in 10_i32..20, bx in 10_i32..20,
        ) {
            let floor = open_floor(30, 30);
            let a = Pos { y: ay, x: ax };
            let b = Pos { y: by, x: bx };
            let from_a = compute_fov(a, 8, &floor);
            let from_b = compute_fov(b, 8, &floor);
            prop_assert_eq!(from_a.is_visible(b), from_b.is_visible(a));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn visibility_is_symmetric_between_walls(
            interior in prop::collection::vec(
                prop::bool::weighted(1.0 / 6.0),
                (WALLED_SIDE - 2) * (WALLED_SIDE - 2),
            ),
        ) {
            const RANGE: i32 = 8;
            let floor = walled_floor(&interior);
            let open: Vec<Pos> = (0..WALLED_SIDE as i32)
                .flat_map(|y| (0..WALLED_SIDE as i32).map(move |x| Pos { y, x }))
                .filter(|&pos| !floor.blocks_sight(pos))
                .collect();
            let views: Vec<VisibilityMap> =
                open.iter().map(|&pos| compute_fov(pos, RANGE, &floor)).collect();

            for (i, &a) in open.iter().enumerate() {
                for (j, &b) in open.iter().enumerate().skip(i + 1) {
                    if a.distance_sq(b) > RANGE * RANGE
                        || !clear_line(&floor, a, b)
                        || !clear_line(&floor, b, a)
                    {
                        continue;
                    }
                    prop_assert_eq!(
                        views[i].is_visible(b),
                        views[j].is_visible(a),
                        "{:?} and {:?} disagree",
                        a,
                        b
                    );
                }
            }
        }

        #[test]
        fn revealed_memory_is_monotonic_over_walks(
            steps in prop::collection::vec((-1_i32..=1, -1_i32..=1), 1..30),
        ) {
            let mut floor = floor_from_rows(&[
                "############",
                "#....#.....#",
                "#.##...###.#",
                "#..#.#.....#",
                "#....#..#..#",
                "############",
            ]);
            let mut pos = Pos { y: 1, x: 1 };
            let mut previous = floor.revealed().to_vec();
            for (dy, dx) in steps {
                let next = pos.offset(dy, dx);
                if floor.is_passable(next) {
                    pos = next;
                }
                let map = compute_fov(pos, 8, &floor);
                floor.update_revealed(&map.visible_mask());
                for (before, after) in previous.iter().zip(floor.revealed()) {
                    prop_assert!(!before || *after);
                }
                previous = floor.revealed().to_vec();
            }
        }
    }
}
