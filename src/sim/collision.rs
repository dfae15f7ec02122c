//! Collision detection and pass scoring
//!
//! All tests are axis-aligned and use the bird's base size, never the pulsed
//! render size.

use super::obstacles::Pipe;
use super::state::Bird;

/// True if the bird's top edge is above the screen or its bottom edge below it
pub fn bird_out_of_bounds(bird: &Bird, screen_height: f32) -> bool {
    bird.top() < 0.0 || bird.bottom() > screen_height
}

/// True if the bird overlaps the pipe horizontally and is not inside its gap
pub fn bird_hits_pipe(bird: &Bird, pipe: &Pipe, pipe_width: f32) -> bool {
    let overlaps_x = bird.left() < pipe.trailing_edge(pipe_width) && bird.right() > pipe.x;
    let outside_gap = bird.top() < pipe.top || bird.bottom() > pipe.bottom;
    overlaps_x && outside_gap
}

/// Index of the first pipe (in screen order) the bird hits, if any
pub fn first_pipe_hit(bird: &Bird, pipes: &[Pipe], pipe_width: f32) -> Option<usize> {
    pipes
        .iter()
        .position(|pipe| bird_hits_pipe(bird, pipe, pipe_width))
}

/// Credit every pipe whose trailing edge is now left of the bird
///
/// Each pipe is credited at most once. Returns how many were newly passed.
pub fn score_passes(bird: &Bird, pipes: &mut [Pipe], pipe_width: f32) -> u64 {
    let mut passed = 0;
    for pipe in pipes.iter_mut().filter(|p| !p.passed) {
        if pipe.trailing_edge(pipe_width) < bird.left() {
            pipe.passed = true;
            passed += 1;
        }
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    const WIDTH: f32 = 40.0;

    fn bird_at(y: f32) -> Bird {
        let mut bird = Bird::new(&Tuning::default());
        bird.pos = Vec2::new(50.0, y);
        bird
    }

    fn pipe(x: f32, top: f32, bottom: f32) -> Pipe {
        Pipe {
            x,
            top,
            bottom,
            vy: 0.0,
            hue: 0.0,
            passed: false,
        }
    }

    #[test]
    fn test_bounds() {
        assert!(!bird_out_of_bounds(&bird_at(0.0), 600.0));
        assert!(bird_out_of_bounds(&bird_at(-0.1), 600.0));
        assert!(!bird_out_of_bounds(&bird_at(580.0), 600.0));
        assert!(bird_out_of_bounds(&bird_at(580.1), 600.0));
    }

    #[test]
    fn test_bird_inside_gap_at_same_x_is_safe() {
        let bird = bird_at(300.0);
        let p = pipe(50.0, 250.0, 350.0);
        assert!(!bird_hits_pipe(&bird, &p, WIDTH));
    }

    #[test]
    fn test_bird_clipping_top_span_hits() {
        let bird = bird_at(245.0);
        let p = pipe(50.0, 250.0, 350.0);
        assert!(bird_hits_pipe(&bird, &p, WIDTH));
    }

    #[test]
    fn test_bird_clipping_bottom_span_hits() {
        let bird = bird_at(335.0);
        let p = pipe(40.0, 250.0, 350.0);
        assert!(bird_hits_pipe(&bird, &p, WIDTH));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Pipe ends exactly where the bird starts
        let bird = bird_at(0.0);
        let p = pipe(10.0, 250.0, 350.0);
        assert!(!bird_hits_pipe(&bird, &p, WIDTH));
        // Pipe starts exactly where the bird ends
        let p = pipe(70.0, 250.0, 350.0);
        assert!(!bird_hits_pipe(&bird, &p, WIDTH));
    }

    #[test]
    fn test_first_hit_short_circuits_in_order() {
        let bird = bird_at(100.0);
        let pipes = [
            pipe(300.0, 50.0, 150.0),
            pipe(45.0, 200.0, 300.0),
            pipe(55.0, 200.0, 300.0),
        ];
        assert_eq!(first_pipe_hit(&bird, &pipes, WIDTH), Some(1));
        assert_eq!(first_pipe_hit(&bird, &pipes[..1], WIDTH), None);
    }

    #[test]
    fn test_score_each_pipe_once() {
        let bird = bird_at(300.0);
        let mut pipes = [
            pipe(5.0, 250.0, 350.0),
            pipe(10.0, 250.0, 350.0),
            pipe(200.0, 250.0, 350.0),
        ];
        // Only the first pipe's trailing edge (45) is strictly left of 50
        assert_eq!(score_passes(&bird, &mut pipes, WIDTH), 1);
        assert!(pipes[0].passed);
        assert!(!pipes[1].passed);
        assert_eq!(score_passes(&bird, &mut pipes, WIDTH), 0);

        pipes[1].x -= 0.5;
        assert_eq!(score_passes(&bird, &mut pipes, WIDTH), 1);
        assert_eq!(score_passes(&bird, &mut pipes, WIDTH), 0);
    }
}
