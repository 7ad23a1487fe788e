use std::io::Cursor;

use ::image::{ImageFormat, Rgb, RgbImage};
use mazecore::{Cell, Direction, Maze, MazeParts};

use super::{ensure_generated, Method, MethodError, MethodKind};
use crate::settings::{Color, ImageStyle};

/// PNG picture of the maze, walls, markers and the solution path.
///
/// Reading an image back needs the same [`ImageStyle`] it was drawn with.
#[derive(Debug, Clone)]
pub struct ImageMethod {
    style: ImageStyle,
}

/// Largest side of a drawn image, PNG limits sides to `i32::MAX`.
const MAX_SIDE: u32 = i32::MAX as u32;
/// Largest RGB buffer drawn, the default decoding limit of `image`.
const MAX_BYTES: u64 = 512 * 1024 * 1024;

/// Square of `size` pixels centred in a cell interior, as offsets from the interior origin.
fn centred(path_width: u32, size: u32) -> (u32, u32) {
    let start = path_width / 2 - size / 2;
    (start, start + size)
}

impl ImageMethod {
    pub fn new(style: ImageStyle) -> Self {
        ImageMethod { style }
    }

    fn stride(&self) -> u32 {
        self.style.path_width + self.style.wall_width
    }

    /// Top left pixel of a cell interior.
    fn origin(&self, cell: Cell) -> (u32, u32) {
        let ww = self.style.wall_width;
        (
            ww + cell.col as u32 * self.stride(),
            ww + cell.row as u32 * self.stride(),
        )
    }

    fn centre(&self, cell: Cell) -> (u32, u32) {
        let (x, y) = self.origin(cell);
        let half = self.style.path_width / 2;
        (x + half, y + half)
    }

    /// Pixel in the middle of the wall to the right or below a cell.
    fn gap(&self, cell: Cell, dir: Direction) -> (u32, u32) {
        let (x, y) = self.origin(cell);
        let ImageStyle {
            path_width: pw,
            wall_width: ww,
            ..
        } = self.style;

        match dir {
            Direction::Right => (x + pw + ww / 2, y + pw / 2),
            _ => (x + pw / 2, y + pw + ww / 2),
        }
    }

    fn path_band(&self) -> (u32, u32) {
        centred(self.style.path_width, (self.style.path_width / 3).max(1))
    }

    fn marker(&self) -> (u32, u32) {
        centred(self.style.path_width, (self.style.path_width / 2).max(1))
    }

    fn fill(img: &mut RgbImage, x: (u32, u32), y: (u32, u32), color: Color) {
        let pixel = Rgb(color.to_array());
        for py in y.0..y.1 {
            for px in x.0..x.1 {
                img.put_pixel(px, py, pixel);
            }
        }
    }

    /// Pixels along a side of `cells` cells, `None` when it does not fit an image.
    fn pixels_along(&self, cells: usize) -> Option<u32> {
        u32::try_from(cells)
            .ok()?
            .checked_mul(self.stride())?
            .checked_add(self.style.wall_width)
            .filter(|&pixels| pixels <= MAX_SIDE)
    }

    /// Image size of a `width` x `height` maze, `None` when it is too large to draw.
    fn image_size(&self, width: usize, height: usize) -> Option<(u32, u32)> {
        let size = (self.pixels_along(width)?, self.pixels_along(height)?);
        let bytes = u64::from(size.0) * u64::from(size.1) * 3;
        (bytes <= MAX_BYTES).then_some(size)
    }

    fn draw(&self, maze: &Maze) -> Result<RgbImage, MethodError> {
        let style = self.style;
        let (pw, ww) = (style.path_width, style.wall_width);
        let Some((width, height)) = self.image_size(maze.width(), maze.height()) else {
            return Err(MethodError::Malformed(format!(
                "{}x{} maze is too large to draw with path width {pw} and wall width {ww}",
                maze.width(),
                maze.height()
            )));
        };

        let mut img = RgbImage::from_pixel(width, height, Rgb(style.wall.to_array()));

        for row in 0..maze.height() {
            for col in 0..maze.width() {
                let cell = Cell::new(row, col);
                let (x, y) = self.origin(cell);
                let mask = maze.passage_mask(cell);

                Self::fill(&mut img, (x, x + pw), (y, y + pw), style.background);
                if mask.is_open(Direction::Right) {
                    Self::fill(&mut img, (x + pw, x + pw + ww), (y, y + pw), style.background);
                }
                if mask.is_open(Direction::Down) {
                    Self::fill(&mut img, (x, x + pw), (y + pw, y + pw + ww), style.background);
                }
            }
        }

        let (band_from, band_to) = self.path_band();
        let band = |cell: Cell| {
            let (x, y) = self.origin(cell);
            ((x + band_from, x + band_to), (y + band_from, y + band_to))
        };

        let path = maze.path();
        for &cell in path {
            let (xs, ys) = band(cell);
            Self::fill(&mut img, xs, ys, style.path);
        }
        // the bounding box of two neighboring bands bridges the wall gap between them
        for pair in path.windows(2) {
            let (ax, ay) = band(pair[0]);
            let (bx, by) = band(pair[1]);
            Self::fill(
                &mut img,
                (ax.0.min(bx.0), ax.1.max(bx.1)),
                (ay.0.min(by.0), ay.1.max(by.1)),
                style.path,
            );
        }

        let (marker_from, marker_to) = self.marker();
        for (cell, color) in [(maze.entrance(), style.start), (maze.exit(), style.end)] {
            let (x, y) = self.origin(cell);
            Self::fill(
                &mut img,
                (x + marker_from, x + marker_to),
                (y + marker_from, y + marker_to),
                color,
            );
        }

        Ok(img)
    }

    fn read(&self, img: &RgbImage) -> Result<MazeParts, MethodError> {
        let style = self.style;
        let color_at = |(x, y): (u32, u32)| Color::from(img.get_pixel(x, y).0);

        let cells_along = |pixels: u32| {
            let inner = pixels.checked_sub(style.wall_width)?;
            (inner % self.stride() == 0).then_some((inner / self.stride()) as usize)
        };
        let (Some(width), Some(height)) = (cells_along(img.width()), cells_along(img.height()))
        else {
            return Err(MethodError::Malformed(format!(
                "image size {}x{} does not fit path width {} and wall width {}",
                img.width(),
                img.height(),
                style.path_width,
                style.wall_width
            )));
        };

        if width.checked_mul(height).map_or(true, |n| n > Maze::MAX_CELLS) {
            return Err(MethodError::Malformed(format!(
                "image holds a {width}x{height} maze, more than {} cells",
                Maze::MAX_CELLS
            )));
        }

        let mut entrance = None;
        let mut exit = None;
        let mut passages = Vec::new();
        // path passages, per cell and direction
        let mut path_links = vec![[false; 4]; width * height];
        let mut path_cells = 0;

        for row in 0..height {
            for col in 0..width {
                let cell = Cell::new(row, col);
                let centre = color_at(self.centre(cell));
                if centre == style.start {
                    entrance = Some(cell);
                } else if centre == style.end {
                    exit = Some(cell);
                } else if centre == style.path {
                    path_cells += 1;
                }

                for dir in [Direction::Right, Direction::Down] {
                    let Some(next) = cell.step(dir, width, height) else {
                        continue;
                    };

                    let gap = color_at(self.gap(cell, dir));
                    if gap == style.wall {
                        continue;
                    }

                    passages.push((cell, next));
                    if gap == style.path {
                        path_links[row * width + col][dir as usize] = true;
                        path_links[next.row * width + next.col][dir.reverse() as usize] = true;
                    }
                }
            }
        }

        let entrance = entrance.ok_or_else(|| MethodError::Malformed("no start marker".into()))?;
        let exit = exit.ok_or_else(|| MethodError::Malformed("no end marker".into()))?;

        let has_path = path_cells > 0 || path_links.iter().flatten().any(|&linked| linked);
        let path = if has_path {
            Self::trace_path(&path_links, width, height, entrance, exit)?
        } else {
            Vec::new()
        };

        Ok(MazeParts {
            width,
            height,
            entrance,
            exit,
            passages,
            generation: None,
            path,
            solved_by: None,
            solve_time: Default::default(),
        })
    }

    /// Follows the drawn path from the entrance until it reaches the exit.
    fn trace_path(
        links: &[[bool; 4]],
        width: usize,
        height: usize,
        entrance: Cell,
        exit: Cell,
    ) -> Result<Vec<Cell>, MethodError> {
        let mut path = vec![entrance];
        let mut previous = None;
        let mut current = entrance;

        while current != exit {
            let next = Direction::ALL
                .into_iter()
                .filter(|&dir| links[current.row * width + current.col][dir as usize])
                .filter_map(|dir| current.step(dir, width, height))
                .find(|&next| Some(next) != previous);

            let Some(next) = next else {
                return Err(MethodError::Malformed(format!(
                    "drawn path breaks off at {current}"
                )));
            };
            if path.len() > width * height {
                return Err(MethodError::Malformed("drawn path loops".into()));
            }

            path.push(next);
            previous = Some(current);
            current = next;
        }

        Ok(path)
    }
}

impl Method for ImageMethod {
    fn kind(&self) -> MethodKind {
        MethodKind::Image
    }

    fn serialize(&self, maze: &Maze) -> Result<Vec<u8>, MethodError> {
        ensure_generated(maze)?;
        self.style.validate().map_err(MethodError::Style)?;

        let mut bytes = Cursor::new(Vec::new());
        self.draw(maze)?.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Maze, MethodError> {
        self.style.validate().map_err(MethodError::Style)?;

        let img = ::image::load_from_memory_with_format(bytes, ImageFormat::Png)?.into_rgb8();
        let parts = self.read(&img)?;
        Ok(Maze::from_parts(parts)?)
    }
}

#[cfg(test)]
mod tests {
    use mazecore::{Algorithm, AlgorithmKind, MazeStatus};

    use super::*;

    fn maze(width: usize, height: usize, solve: bool) -> Maze {
        let mut maze = Maze::new(width, height).unwrap();
        maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(21)))
            .unwrap();
        if solve {
            maze.solve(&mut Algorithm::new(AlgorithmKind::BreadthFirstSearch, None))
                .unwrap();
        }
        maze
    }

    #[test]
    fn image_geometry() {
        let method = ImageMethod::new(ImageStyle::default().path_width(6).wall_width(2));
        let img = method.draw(&maze(4, 3, false)).unwrap();

        assert_eq!(img.width(), 4 * 6 + 4 * 2 + 2);
        assert_eq!(img.height(), 3 * 6 + 3 * 2 + 2);
        // corner pillar and outer border are walls
        assert_eq!(img.get_pixel(0, 0).0, Color::WHITE.to_array());
        assert_eq!(img.get_pixel(img.width() - 1, 5).0, Color::WHITE.to_array());
        // start marker in the first cell
        let (x, y) = method.centre(Cell::ORIGIN);
        assert_eq!(img.get_pixel(x, y).0, Color::GREEN.to_array());
    }

    #[test]
    fn round_trip_with_path() {
        for (pw, ww) in [(1, 1), (2, 1), (3, 1), (6, 2), (5, 3)] {
            let method = ImageMethod::new(ImageStyle::default().path_width(pw).wall_width(ww));
            let maze = maze(7, 5, true);

            let loaded = method.deserialize(&method.serialize(&maze).unwrap()).unwrap();
            assert_eq!(loaded.status(), MazeStatus::Solved, "{pw}/{ww}");
            assert_eq!(loaded.graph(), maze.graph(), "{pw}/{ww}");
            assert_eq!(loaded.entrance(), maze.entrance());
            assert_eq!(loaded.exit(), maze.exit());
            assert_eq!(loaded.path(), maze.path(), "{pw}/{ww}");
        }
    }

    #[test]
    fn round_trip_without_path() {
        let method = ImageMethod::new(ImageStyle::default());
        let maze = maze(4, 4, false);

        let loaded = method.deserialize(&method.serialize(&maze).unwrap()).unwrap();
        assert_eq!(loaded.status(), MazeStatus::Generated);
        assert_eq!(loaded.graph(), maze.graph());
    }

    #[test]
    fn style_must_match() {
        let bytes = ImageMethod::new(ImageStyle::default())
            .serialize(&maze(5, 5, true))
            .unwrap();

        let other = ImageMethod::new(ImageStyle::default().path_width(5));
        assert!(matches!(
            other.deserialize(&bytes),
            Err(MethodError::Malformed(_))
        ));
    }

    #[test]
    fn oversized_styles_and_mazes_are_errors() {
        let maze = maze(4, 4, true);
        let wide = ImageMethod::new(ImageStyle::default().path_width(u32::MAX));
        assert!(matches!(wide.serialize(&maze), Err(MethodError::Style(_))));
        assert!(matches!(wide.deserialize(&[]), Err(MethodError::Style(_))));

        let method = ImageMethod::new(
            ImageStyle::default()
                .path_width(ImageStyle::MAX_LINE_WIDTH)
                .wall_width(ImageStyle::MAX_LINE_WIDTH),
        );
        assert_eq!(method.pixels_along(4), Some(4 * 2048 + 1024));
        assert_eq!(method.pixels_along(1 << 21), None);
        assert_eq!(method.pixels_along(usize::MAX), None);
        assert_eq!(method.image_size(4, 4), Some((9216, 9216)));
        assert_eq!(method.image_size(64, 64), None);
    }
}
