//! Bundled word lists.

pub(crate) const NOUNS: &[&str] = &[
    "acorn", "airport", "anchor", "apple", "arch", "attic", "badge", "balloon", "barn",
    "basket", "beach", "beacon", "bell", "bicycle", "blanket", "boat", "book", "bottle",
    "bridge", "brush", "bucket", "cabin", "camera", "candle", "canyon", "carpet", "castle",
    "cathedral", "chair", "cloud", "coat", "comet", "compass", "cottage", "crater", "crown",
    "desert", "diamond", "doorway", "dragon", "drum", "eagle", "engine", "falcon", "feather",
    "fence", "field", "forest", "fountain", "garden", "glacier", "guitar", "hammer", "harbor",
    "helmet", "island", "jacket", "kettle", "kingdom", "ladder", "lantern", "library",
    "lighthouse", "meadow", "mirror", "mountain", "needle", "ocean", "orchard", "owl",
    "palace", "pebble", "pencil", "piano", "planet", "pocket", "puzzle", "quarry", "river",
    "rocket", "saddle", "satellite", "shadow", "shelter", "signal", "spoon", "stable",
    "statue", "storm", "telescope", "thimble", "thunder", "tower", "tunnel", "umbrella",
    "valley", "village", "violin", "volcano", "wagon", "whistle", "window", "wizard",
];

pub(crate) const VERBS: &[&str] = &[
    "accept", "admire", "arrive", "balance", "bake", "bounce", "breathe", "build", "carry",
    "chase", "climb", "collect", "count", "crawl", "dance", "deliver", "dig", "discover",
    "drift", "drink", "echo", "embrace", "escape", "explore", "fetch", "float", "fold",
    "gather", "glide", "glow", "grow", "guard", "hover", "hum", "hunt", "imagine", "inspect",
    "invent", "jog", "juggle", "jump", "kneel", "knit", "laugh", "launch", "listen", "march",
    "melt", "mend", "navigate", "notice", "observe", "open", "paint", "pause", "plant",
    "polish", "pour", "question", "race", "read", "remember", "repair", "rescue", "roam",
    "sail", "scatter", "search", "shine", "shiver", "sing", "sketch", "slide", "sparkle",
    "sprint", "stretch", "swim", "teach", "tumble", "twist", "unfold", "vanish", "wander",
    "watch", "whisper", "wiggle", "wonder", "write", "yawn", "zoom",
];

pub(crate) const ADJECTIVES: &[&str] = &[
    "adorable", "ancient", "bitter", "blazing", "bold", "brave", "breezy", "bright",
    "brisk", "calm", "careful", "cheerful", "clever", "cloudy", "crisp", "curious", "damp",
    "dazzling", "delicate", "distant", "dusty", "eager", "elegant", "enormous", "faded",
    "fearless", "fierce", "fragile", "fresh", "friendly", "gentle", "gigantic", "gleaming",
    "golden", "graceful", "grumpy", "hollow", "honest", "humble", "icy", "jolly", "keen",
    "lively", "lonely", "lucky", "majestic", "mellow", "misty", "modest", "narrow", "noble",
    "odd", "patient", "peaceful", "polite", "proud", "quick", "quiet", "rapid", "restless",
    "rusty", "scarlet", "serene", "shiny", "silent", "silver", "sleepy", "slender", "smooth",
    "sturdy", "swift", "tender", "tidy", "tiny", "tranquil", "vast", "velvet", "vivid",
    "wandering", "warm", "weary", "wild", "wise", "witty", "wooden", "young", "zealous",
];

pub(crate) const ADVERBS: &[&str] = &[
    "abruptly", "absently", "accidentally", "angrily", "anxiously", "awkwardly", "boldly",
    "bravely", "briskly", "brightly", "calmly", "carefully", "cautiously", "cheerfully",
    "clumsily", "curiously", "deliberately", "eagerly", "easily", "elegantly", "evenly",
    "faithfully", "fiercely", "fondly", "freely", "gently", "gladly", "gracefully",
    "greedily", "happily", "hastily", "honestly", "hungrily", "innocently", "joyfully",
    "kindly", "lazily", "lightly", "loosely", "loudly", "madly", "merrily", "mysteriously",
    "neatly", "nervously", "noisily", "obediently", "openly", "patiently", "perfectly",
    "playfully", "politely", "promptly", "proudly", "quickly", "quietly", "rapidly",
    "rarely", "readily", "recklessly", "repeatedly", "roughly", "sadly", "safely",
    "seldom", "sharply", "shyly", "silently", "sleepily", "slowly", "smoothly", "softly",
    "solemnly", "speedily", "steadily", "sternly", "swiftly", "tenderly", "thoughtfully",
    "tightly", "truly", "unexpectedly", "vaguely", "warmly", "wearily", "wildly", "wisely",
    "zealously",
];
