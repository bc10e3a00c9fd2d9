use crate::{GalaxyError, GalaxyParams, PointCloud};
use rand::prelude::*;
use std::f32::consts::TAU;

/// Base angle of branch `index` when `branches` arms are spread evenly.
pub fn branch_angle(index: usize, branches: usize) -> f32 {
    index as f32 * (TAU / branches as f32)
}

/// Number of points assigned to each branch, in branch order.
///
/// The first `count % branches` branches take one extra point so the sizes
/// always sum to `count`. Yields nothing when `branches` is zero.
pub fn branch_sizes(count: usize, branches: usize) -> impl Iterator<Item = usize> {
    let base = count.checked_div(branches).unwrap_or(0);
    let extra = count.checked_rem(branches).unwrap_or(0);
    (0..branches).map(move |i| base + usize::from(i < extra))
}

/// Signed scatter for one axis of a point at distance `r`.
///
/// `u^power` with `u` uniform in `[0, 1)`, so a larger `power` concentrates
/// the offsets near zero.
pub fn scatter_offset<R: Rng + ?Sized>(rng: &mut R, randomness: f32, power: f32, r: f32) -> f32 {
    let magnitude = rng.random::<f32>().powf(power) * randomness * r;
    if rng.random_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

/// Color of a point at distance `r`, mixed per sRGB channel from the inside
/// color (`r = 0`) to the outside color (`r = radius`).
pub fn radial_color(params: &GalaxyParams, r: f32) -> [f32; 3] {
    let t = (r / params.radius).clamp(0.0, 1.0);
    // a * (1 - t) + b * t hits both endpoints exactly
    let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
    let (inside, outside) = (params.inside_color, params.outside_color);
    [
        mix(inside.red, outside.red),
        mix(inside.green, outside.green),
        mix(inside.blue, outside.blue),
    ]
}

/// Builds a fresh point cloud for `params`, drawing all randomness from `rng`.
///
/// Parameters are validated before anything is allocated.
pub fn generate<R: Rng + ?Sized>(
    params: &GalaxyParams,
    rng: &mut R,
) -> Result<PointCloud, GalaxyError> {
    params.validate()?;

    let mut positions = Vec::with_capacity(params.count);
    let mut colors = Vec::with_capacity(params.count);

    for (branch, size) in branch_sizes(params.count, params.branches).enumerate() {
        let angle = branch_angle(branch, params.branches);
        for _ in 0..size {
            let r = rng.random::<f32>() * params.radius;
            let theta = angle + r * params.spin;
            let [ox, oy, oz] = [(); 3].map(|_| {
                scatter_offset(&mut *rng, params.randomness, params.randomness_power, r)
            });

            positions.push([theta.cos() * r + ox, oy, theta.sin() * r + oz]);
            colors.push(radial_color(params, r));
        }
    }

    Ok(PointCloud::from_parts(positions, colors))
}

/// [`generate`] with a deterministic random source.
pub fn generate_seeded(params: &GalaxyParams, seed: u64) -> Result<PointCloud, GalaxyError> {
    generate(params, &mut StdRng::seed_from_u64(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;

    fn flat_params() -> GalaxyParams {
        GalaxyParams {
            count: 12,
            branches: 3,
            radius: 5.0,
            spin: 0.0,
            randomness: 0.0,
            ..default()
        }
    }

    #[test]
    fn branch_sizes_sum_to_count() {
        assert_eq!(branch_sizes(10, 3).collect::<Vec<_>>(), vec![4, 3, 3]);
        assert_eq!(branch_sizes(12, 3).collect::<Vec<_>>(), vec![4, 4, 4]);
        assert_eq!(branch_sizes(2, 5).collect::<Vec<_>>(), vec![1, 1, 0, 0, 0]);
        for count in 1..60 {
            for branches in 1..12 {
                let sizes: Vec<_> = branch_sizes(count, branches).collect();
                assert_eq!(sizes.len(), branches);
                assert_eq!(sizes.iter().sum::<usize>(), count);
                let spread = sizes.iter().max().unwrap() - sizes.iter().min().unwrap();
                assert!(spread <= 1, "{count}/{branches}: {sizes:?}");
            }
        }
        assert_eq!(branch_sizes(10, 0).count(), 0);
    }

    #[test]
    fn cloud_length_matches_count() {
        for (count, branches) in [(1, 1), (1, 3), (10, 3), (100, 7), (1001, 20)] {
            let params = GalaxyParams {
                count,
                branches,
                ..default()
            };
            let cloud = generate_seeded(&params, 7).unwrap();
            assert_eq!(cloud.len(), count);
            assert_eq!(cloud.positions().len(), count);
            assert_eq!(cloud.colors().len(), count);
        }
    }

    #[test]
    fn color_endpoints_are_exact() {
        let params = GalaxyParams::default();
        let inside = params.inside_color;
        let outside = params.outside_color;

        assert_eq!(radial_color(&params, 0.0), [inside.red, inside.green, inside.blue]);
        assert_eq!(
            radial_color(&params, params.radius),
            [outside.red, outside.green, outside.blue]
        );

        let mid = radial_color(&params, params.radius * 0.5);
        let expected = [
            (inside.red + outside.red) * 0.5,
            (inside.green + outside.green) * 0.5,
            (inside.blue + outside.blue) * 0.5,
        ];
        for (got, want) in mid.iter().zip(expected) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn colors_stay_in_unit_range() {
        let cloud = generate_seeded(&GalaxyParams { count: 5000, ..default() }, 3).unwrap();
        assert!(cloud.colors().iter().flatten().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn zero_randomness_places_points_on_branch_rays() {
        let params = GalaxyParams {
            count: 300,
            branches: 5,
            spin: 0.0,
            randomness: 0.0,
            ..default()
        };
        let cloud = generate_seeded(&params, 11).unwrap();

        let mut index = 0;
        for (branch, size) in branch_sizes(params.count, params.branches).enumerate() {
            let theta = branch_angle(branch, params.branches);
            for _ in 0..size {
                let [x, y, z] = cloud.positions()[index];
                assert_eq!(y, 0.0);
                // perpendicular distance from the branch ray
                let across = z * theta.cos() - x * theta.sin();
                let along = x * theta.cos() + z * theta.sin();
                assert!(across.abs() < 1e-5, "point {index} off its branch");
                assert!(along >= -1e-5 && along <= params.radius + 1e-4);
                index += 1;
            }
        }
    }

    #[test]
    fn zero_randomness_with_spin_follows_the_spiral() {
        let params = GalaxyParams {
            count: 200,
            branches: 2,
            spin: 1.5,
            randomness: 0.0,
            ..default()
        };
        let cloud = generate_seeded(&params, 5).unwrap();
        for (i, [x, y, z]) in cloud.positions().iter().copied().enumerate() {
            let branch = i / 100;
            let r = x.hypot(z);
            let theta = branch_angle(branch, 2) + r * params.spin;
            assert_eq!(y, 0.0);
            assert!((x - theta.cos() * r).abs() < 1e-4);
            assert!((z - theta.sin() * r).abs() < 1e-4);
        }
    }

    #[test]
    fn twelve_points_on_three_branches() {
        let params = flat_params();
        let cloud = generate_seeded(&params, 42).unwrap();
        assert_eq!(cloud.len(), 12);

        let angles = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
        for (i, [x, y, z]) in cloud.positions().iter().copied().enumerate() {
            let theta = angles[i / 4];
            let r = x.hypot(z);
            assert!(r <= 5.0 + 1e-4);
            assert_eq!(y, 0.0);
            assert!((x - theta.cos() * r).abs() < 1e-5);
            assert!((z - theta.sin() * r).abs() < 1e-5);

            let color = radial_color(&params, r);
            for (got, want) in cloud.colors()[i].iter().zip(color) {
                assert!((got - want).abs() < 1e-5);
            }
        }
        // first branch sits on the positive x axis
        for [_, _, z] in &cloud.positions()[..4] {
            assert_eq!(*z, 0.0);
        }
    }

    #[test]
    fn uneven_count_fills_leading_branches_first() {
        let params = GalaxyParams {
            count: 10,
            ..flat_params()
        };
        let cloud = generate_seeded(&params, 8).unwrap();
        assert_eq!(cloud.len(), 10);

        let expected_branch = |i: usize| match i {
            0..4 => 0,
            4..7 => 1,
            _ => 2,
        };
        for (i, [x, y, z]) in cloud.positions().iter().copied().enumerate() {
            let theta = branch_angle(expected_branch(i), 3);
            let r = x.hypot(z);
            assert_eq!(y, 0.0);
            assert!((x - theta.cos() * r).abs() < 1e-5, "point {i} off its branch");
            assert!((z - theta.sin() * r).abs() < 1e-5, "point {i} off its branch");
        }
    }

    #[test]
    fn accepts_a_trait_object_rng() {
        let params = GalaxyParams {
            count: 50,
            ..default()
        };
        let mut boxed: Box<dyn RngCore> = Box::new(StdRng::seed_from_u64(21));
        let from_dyn = generate(&params, &mut *boxed).unwrap();
        assert_eq!(from_dyn, generate_seeded(&params, 21).unwrap());

        let offset = scatter_offset(&mut *boxed, 1.0, 1.0, 2.0);
        assert!(offset.abs() <= 2.0);
    }

    #[test]
    fn higher_power_pulls_scatter_inward() {
        let spread = |power: f32| -> f32 {
            let params = GalaxyParams {
                count: 2000,
                spin: 0.0,
                randomness: 1.0,
                randomness_power: power,
                ..default()
            };
            let cloud = generate_seeded(&params, 99).unwrap();
            // y carries nothing but scatter
            cloud.positions().iter().map(|p| p[1].abs()).sum()
        };

        let (low, mid, high) = (spread(1.0), spread(3.0), spread(8.0));
        assert!(low > mid, "{low} <= {mid}");
        assert!(mid > high, "{mid} <= {high}");
    }

    #[test]
    fn scatter_is_bounded_by_randomness_times_radius() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut saw_negative = false;
        let mut saw_positive = false;
        for _ in 0..1000 {
            let offset = scatter_offset(&mut rng, 0.5, 2.0, 4.0);
            assert!(offset.abs() <= 2.0);
            saw_negative |= offset < 0.0;
            saw_positive |= offset > 0.0;
        }
        assert!(saw_negative && saw_positive);
    }

    #[test]
    fn same_seed_same_cloud() {
        let params = GalaxyParams { count: 1000, ..default() };
        let a = generate_seeded(&params, 1234).unwrap();
        let b = generate_seeded(&params, 1234).unwrap();
        let c = generate_seeded(&params, 4321).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let base = GalaxyParams::default();
        for params in [
            GalaxyParams { count: 0, ..base },
            GalaxyParams { branches: 0, ..base },
            GalaxyParams { radius: 0.0, ..base },
        ] {
            assert!(matches!(
                generate_seeded(&params, 0),
                Err(GalaxyError::InvalidParameter { .. })
            ));
        }
    }
}
