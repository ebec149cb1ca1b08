// Chaosicon - Deterministic identicons and names from arbitrary strings
// Copyright (c) 2025 Filipe da Veiga Ventura Alves
// Licensed under MIT License

use base64::Engine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chaosicon::colors::{BACKGROUND_COLORS, COLORS};
use chaosicon::hash::MIN_DIGEST_LEN;
use chaosicon::{
    create_identicon, generate_identicon_data_uri, generate_identicon_markup, generate_name,
    identicon_params, make_hash, Colors, FeatureCatalog, IdenticonFormat, Namer, FALLBACK_NAME,
};

const NQ_ADDRESS: &str = "NQ09 VF5Y 1PKV MRM4 5LE1 55KV P6R2 GXYJ XYQF";

struct Golden {
    input: &'static str,
    colors: Colors,
    // Feature asset keys: face, top, sides, bottom
    keys: [&'static str; 4],
    name: &'static str,
}

fn goldens() -> Vec<Golden> {
    vec![
        Golden {
            input: "",
            colors: Colors { main: "#D94432", background: "#FC8702", accent: "#E9B213" },
            keys: ["face/face_01.svg", "top/top_01.svg", "sides/sides_01.svg", "bottom/bottom_01.svg"],
            name: "Pointy Stroking Joker",
        },
        Golden {
            input: "a",
            colors: Colors { main: "#FA7268", background: "#E9B213", accent: "#D94432" },
            keys: ["face/face_20.svg", "top/top_10.svg", "sides/sides_21.svg", "bottom/bottom_20.svg"],
            name: "Hectic Shooting Cockatoo",
        },
        Golden {
            input: "Hello World",
            colors: Colors { main: "#FA7268", background: "#1F2348", accent: "#FC8702" },
            keys: ["face/face_12.svg", "top/top_09.svg", "sides/sides_02.svg", "bottom/bottom_08.svg"],
            name: "Pink Shivering Elf",
        },
        Golden {
            input: "identicon",
            colors: Colors { main: "#5961A8", background: "#FC8702", accent: "#E9B213" },
            keys: ["face/face_02.svg", "top/top_19.svg", "sides/sides_19.svg", "bottom/bottom_01.svg"],
            name: "Sleepy Stroking Firefly",
        },
        Golden {
            input: NQ_ADDRESS,
            colors: Colors { main: "#E9B213", background: "#FC8702", accent: "#1A5493" },
            keys: ["face/face_08.svg", "top/top_12.svg", "sides/sides_12.svg", "bottom/bottom_07.svg"],
            name: "Mighty Nibbling Buccaneer",
        },
    ]
}

#[test]
fn golden_identicon_params() {
    let catalog = FeatureCatalog::embedded();
    for golden in goldens() {
        let params = identicon_params(golden.input).unwrap();
        assert_eq!(params.colors, golden.colors, "colors for {:?}", golden.input);

        let sections = params.sections;
        let got = [sections.face, sections.top, sections.sides, sections.bottom];
        for (fragment, key) in got.into_iter().zip(golden.keys) {
            assert_eq!(Some(fragment), catalog.get(key), "{key} for {:?}", golden.input);
        }
    }
}

#[test]
fn golden_names() {
    for golden in goldens() {
        assert_eq!(generate_name(golden.input).unwrap(), golden.name, "name for {:?}", golden.input);
    }
}

#[test]
fn markup_embeds_resolved_params() {
    for golden in goldens() {
        let svg = generate_identicon_markup(golden.input).unwrap();
        let params = identicon_params(golden.input).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(&format!("color=\"{}\"", golden.colors.main)));
        assert!(svg.contains(&format!("<path fill=\"{}\" d=\"M0 0h160v160H0z\"/>", golden.colors.background)));
        assert!(svg.contains(params.sections.face));
        assert!(svg.contains(params.sections.bottom));
    }
}

#[test]
fn data_uri_decodes_to_markup() {
    let uri = generate_identicon_data_uri(NQ_ADDRESS).unwrap();
    let payload = uri.strip_prefix("data:image/svg+xml;base64,").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD.decode(payload).unwrap();

    assert_eq!(String::from_utf8(decoded).unwrap(), generate_identicon_markup(NQ_ADDRESS).unwrap());
    assert_eq!(create_identicon(NQ_ADDRESS, IdenticonFormat::DataUri).unwrap(), uri);
    assert_eq!(
        create_identicon(NQ_ADDRESS, "image/png".parse().unwrap()).unwrap(),
        generate_identicon_markup(NQ_ADDRESS).unwrap()
    );
}

#[test]
fn outputs_are_deterministic() {
    for input in ["", "a", NQ_ADDRESS, "😀"] {
        assert_eq!(generate_identicon_markup(input).unwrap(), generate_identicon_markup(input).unwrap());
        assert_eq!(generate_name(input).unwrap(), generate_name(input).unwrap());
    }
}

fn random_input(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..48);
    (0..len)
        .map(|_| match rng.gen_range(0..10) {
            0 => char::from_u32(rng.gen_range(0x80..0x2FFF)).unwrap_or('?'),
            _ => rng.gen_range(' '..='~'),
        })
        .collect()
}

#[test]
fn random_inputs_give_long_digests_and_distinct_colors() {
    let mut rng = StdRng::seed_from_u64(0x1DE1);
    for _ in 0..500 {
        let input = random_input(&mut rng);
        assert!(make_hash(&input).len() >= MIN_DIGEST_LEN, "digest for {input:?}");

        let Colors { main, background, accent } = identicon_params(&input).unwrap().colors;
        assert!(COLORS.contains(&main) && COLORS.contains(&accent));
        assert!(BACKGROUND_COLORS.contains(&background));
        assert_ne!(main, accent, "main/accent for {input:?}");

        let main_index = COLORS.iter().position(|c| *c == main);
        let background_index = BACKGROUND_COLORS.iter().position(|c| *c == background);
        let accent_index = COLORS.iter().position(|c| *c == accent);
        assert_ne!(main_index, background_index, "main/background for {input:?}");
        assert_ne!(accent_index, background_index, "accent/background for {input:?}");
    }
}

#[test]
fn random_names_fit_the_badge() {
    let namer = Namer::embedded().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let input = random_input(&mut rng);
        let name = namer.name(&input);
        if name == FALLBACK_NAME {
            continue;
        }

        let widths: Vec<u32> = name.split(' ').map(|word| namer.width_of(word).unwrap()).collect();
        assert_eq!(widths.len(), 3, "{name:?} for {input:?}");
        assert!(widths[0] + 2 + widths[1] <= 74 || widths[1] + 2 + widths[2] <= 74, "{name:?}");
        assert!(widths.iter().sum::<u32>() + 4 <= 124, "{name:?}");
    }
}
