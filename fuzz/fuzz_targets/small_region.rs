#![no_main]

use libfuzzer_sys::fuzz_target;
use present_packing::{CandidatePolicy, Evaluator, Region, SearchConfig, Shape, ShapeSet, Verdict};

const SHAPE_COUNT: usize = 5;

#[derive(Debug)]
struct SmallRegionInput {
    width: usize,
    height: usize,
    counts: [usize; SHAPE_COUNT],
}

impl<'a> arbitrary::Arbitrary<'a> for SmallRegionInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let width = usize::from(u.arbitrary::<u8>()? % 4) + 1;
        let height = usize::from(u.arbitrary::<u8>()? % 4) + 1;
        let counts = u.arbitrary::<[u8; SHAPE_COUNT]>()?.map(|count| usize::from(count % 3));

        Ok(SmallRegionInput {
            width,
            height,
            counts,
        })
    }
}

fn shapes() -> ShapeSet {
    let shapes = vec![
        Shape::new(0, [(0, 0)]),
        Shape::new(1, [(0, 0), (0, 1)]),
        Shape::new(2, [(0, 0), (1, 0), (1, 1)]),
        Shape::new(3, [(0, 0), (0, 1), (1, 0), (1, 1)]),
        Shape::new(4, [(0, 0), (0, 1), (0, 2), (1, 1)]),
    ];

    ShapeSet::try_from(shapes.into_iter().collect::<Result<Vec<_>, _>>().unwrap()).unwrap()
}

fuzz_target!(|data: SmallRegionInput| {
    let shapes = shapes();
    let region = Region::from_counts(data.width, data.height, &data.counts).unwrap();

    let memoized = Evaluator::new(&shapes).evaluate(&region).unwrap().verdict;
    let plain = Evaluator::with_config(&shapes, SearchConfig::default().with_memoize(false))
        .evaluate(&region)
        .unwrap()
        .verdict;
    assert_eq!(memoized, plain);
    assert_ne!(memoized, Verdict::Undecided);

    // The full search can only find more packings than the frontier search.
    let exhaustive = Evaluator::with_config(
        &shapes,
        SearchConfig::default().with_candidates(CandidatePolicy::Exhaustive),
    )
    .evaluate(&region)
    .unwrap()
    .verdict;
    if memoized == Verdict::Fits {
        assert_eq!(exhaustive, Verdict::Fits);
    }
});
