// THEORY:
// The `MotionDelta` module is the signal-processing heart of the detector.
// It answers exactly one question about a pair of consecutive preprocessed
// frames: did something move between them that is big enough to be a hand or
// an arm, rather than noise?
//
// Key architectural principles & algorithm steps:
// 1.  **Absolute Difference**: The per-pixel intensity change between the two
//     frames is the raw motion evidence. A static scene differences to near
//     zero everywhere; a moving object leaves its silhouette twice (where it
//     was and where it is now).
// 2.  **Binarization**: A fixed threshold splits that evidence into a hard
//     changed/unchanged mask. Everything at or below the threshold is treated
//     as camera or lighting noise and discarded outright.
// 3.  **Dilation**: Real motion rarely survives thresholding as one solid
//     shape; it fragments into shreds. Growing every changed pixel outward a
//     couple of times fuses those shreds back into contiguous blobs.
// 4.  **Region Extraction**: A breadth-first flood over the mask groups the
//     changed pixels into connected regions and measures each region's area.
//     Only the outer extent matters; holes inside a region do not split it.
// 5.  **Stateless Utility**: Like the preprocessor, this module keeps no
//     state of its own. The pipeline owns the frames and feeds in both; this
//     module only measures.

use crate::core_modules::frame::GrayFrame;
use crate::error::WaveError;

pub mod motion_delta {
    use super::*; // Make the frame and error types from the parent available.
    use std::collections::VecDeque;

    const CHANGED: u8 = 255;
    const UNCHANGED: u8 = 0;

    /// Decides whether significant motion occurred between two preprocessed
    /// frames of identical dimensions.
    pub fn detect_motion(
        previous: &GrayFrame,
        current: &GrayFrame,
        diff_threshold: u8,
        dilate_iterations: u32,
        min_region_area: usize,
    ) -> Result<bool, WaveError> {
        if previous.width != current.width || previous.height != current.height {
            return Err(WaveError::DimensionMismatch {
                current_width: current.width,
                current_height: current.height,
                previous_width: previous.width,
                previous_height: previous.height,
            });
        }

        let width = current.width as usize;
        let height = current.height as usize;

        // --- 1. Absolute Difference & Binarization ---
        let mut mask = change_mask(&previous.data, &current.data, diff_threshold);

        // --- 2. Dilation ---
        for _ in 0..dilate_iterations {
            mask = dilate(&mask, width, height);
        }

        // --- 3. Region Extraction & Decision ---
        let areas = region_areas(&mask, width, height);
        Ok(areas.into_iter().any(|area| area > min_region_area))
    }

    /// Marks every pixel whose intensity moved by more than `diff_threshold`.
    fn change_mask(previous: &[u8], current: &[u8], diff_threshold: u8) -> Vec<u8> {
        previous
            .iter()
            .zip(current.iter())
            .map(|(&before, &after)| {
                if before.abs_diff(after) > diff_threshold {
                    CHANGED
                } else {
                    UNCHANGED
                }
            })
            .collect()
    }

    /// Grows every changed region by one pixel in all eight directions.
    fn dilate(mask: &[u8], width: usize, height: usize) -> Vec<u8> {
        let mut out = vec![UNCHANGED; mask.len()];
        for y in 0..height {
            for x in 0..width {
                'neighbors: for dy in -1..=1 {
                    for dx in -1..=1 {
                        let ny = y as i32 + dy;
                        let nx = x as i32 + dx;
                        if ny >= 0
                            && ny < height as i32
                            && nx >= 0
                            && nx < width as i32
                            && mask[ny as usize * width + nx as usize] == CHANGED
                        {
                            out[y * width + x] = CHANGED;
                            break 'neighbors;
                        }
                    }
                }
            }
        }
        out
    }

    /// Measures the pixel area of every connected changed region with a
    /// breadth-first flood over the mask. Regions are 8-connected, so two
    /// blobs touching only diagonally still count as one object.
    fn region_areas(mask: &[u8], width: usize, height: usize) -> Vec<usize> {
        let mut visited = vec![false; mask.len()];
        let mut areas = Vec::new();

        for seed in 0..mask.len() {
            if mask[seed] != CHANGED || visited[seed] {
                continue;
            }

            let mut area = 0usize;
            let mut queue = VecDeque::new();
            visited[seed] = true;
            queue.push_back(seed);

            while let Some(index) = queue.pop_front() {
                area += 1;
                let y = (index / width) as i32;
                let x = (index % width) as i32;

                for dy in -1..=1 {
                    for dx in -1..=1 {
                        // Skip the center point itself.
                        if dy == 0 && dx == 0 {
                            continue;
                        }
                        let ny = y + dy;
                        let nx = x + dx;
                        if ny >= 0 && ny < height as i32 && nx >= 0 && nx < width as i32 {
                            let neighbor = ny as usize * width + nx as usize;
                            if !visited[neighbor] && mask[neighbor] == CHANGED {
                                visited[neighbor] = true;
                                queue.push_back(neighbor);
                            }
                        }
                    }
                }
            }

            areas.push(area);
        }

        areas
    }

}
