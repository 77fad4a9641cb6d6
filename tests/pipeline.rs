use region_damage::prelude::*;
use region_damage::sample::synthetic;
use rstest::*;

#[fixture]
fn demo_rects() -> Vec<Rect> {
    [(20, 60, 0, 20), (200, 300, 150, 170), (50, 100, 400, 430)]
        .into_iter()
        .map(|coords| Rect::try_from(coords).unwrap())
        .collect()
}

#[rstest]
fn test_damage_restore_and_present(demo_rects: Vec<Rect>) {
    let original = synthetic(512, 512);
    let damage = simulate_damage(&original, &demo_rects).unwrap();
    assert_eq!(damaged_pixel_count(&damage.mask), 4300);

    let restored = HarmonicFill::new(200, 1e-2)
        .restore(&damage.damaged, &damage.mask, ChannelMode::Multichannel)
        .unwrap();
    assert_eq!(restored.dim(), original.dim());
    for ((row, col, channel), value) in restored.indexed_iter() {
        if damage.mask[(row, col)] {
            // blue never drops below 40 in the test card
            if channel == 2 {
                assert!(*value >= 39, "pixel ({row}, {col}) was not filled");
            }
        } else {
            assert_eq!(*value, original[(row, col, channel)]);
        }
    }

    let panels = Panels::new(original.clone(), damage.mask, damage.damaged, restored).unwrap();
    assert_eq!(
        panels.iter().map(|panel| panel.title.as_str()).collect::<Vec<_>>(),
        ["Original image", "Mask", "Defected image", "Inpainted image"]
    );
    assert_eq!(panels.original().content, PanelContent::Color(original));
}

#[rstest]
fn test_order_and_duplicates_do_not_change_mask(demo_rects: Vec<Rect>) {
    let mut shuffled = demo_rects.clone();
    shuffled.reverse();
    shuffled.push(demo_rects[1]);

    let expected = build_mask((512, 512), &demo_rects).unwrap();
    assert_eq!(build_mask((512, 512), &shuffled).unwrap(), expected);
}

#[test]
fn test_errors_leave_no_output() {
    let original = synthetic(512, 512);
    let mask = build_mask((511, 512), &[]).unwrap();
    assert!(matches!(
        apply_damage(&original, &mask),
        Err(Error::ShapeMismatch {
            mask: (511, 512),
            image: (512, 512)
        })
    ));

    let inverted = Rect {
        row_start: 60,
        row_end: 20,
        col_start: 0,
        col_end: 20,
    };
    assert!(matches!(
        simulate_damage(&original, &[inverted]),
        Err(Error::InvalidRectangle(_))
    ));
}
