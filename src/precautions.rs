//! Static pose-precaution lookup.
//!
//! Pure configuration data: each entry pairs a pose name with practice
//! guidance and contraindications, displayed verbatim by callers. The
//! classifier never reads this table.

/// Precaution text for one pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precautions {
    /// How to approach the pose safely, in display order.
    pub guidance: &'static [&'static str],
    /// Conditions under which the pose should be avoided, in display order.
    pub contraindications: &'static [&'static str],
}

const POSE_PRECAUTIONS: &[(&str, Precautions)] = &[
    (
        "Tree Pose",
        Precautions {
            guidance: &[
                "Keep the standing knee soft, never locked",
                "Use a wall for balance support when starting out",
                "Fix the gaze on a still point to steady balance",
            ],
            contraindications: &[
                "Avoid with acute ankle or knee injuries",
                "Avoid unsupported if prone to dizziness or low blood pressure",
            ],
        },
    ),
    (
        "Downward Dog",
        Precautions {
            guidance: &[
                "Bend the knees generously if the hamstrings are tight",
                "Spread the fingers and press evenly through both palms",
                "Keep the neck relaxed between the upper arms",
            ],
            contraindications: &[
                "Avoid with carpal tunnel syndrome or wrist injury",
                "Avoid with uncontrolled high blood pressure",
                "Avoid in late-term pregnancy",
            ],
        },
    ),
    (
        "Headstand",
        Precautions {
            guidance: &[
                "Learn against a wall under qualified supervision",
                "Carry the weight on the forearms, not the head",
                "Come down at the first sign of neck strain",
            ],
            contraindications: &[
                "Avoid with neck or shoulder injuries",
                "Avoid with high blood pressure, glaucoma or heart conditions",
                "Avoid during menstruation or pregnancy",
            ],
        },
    ),
    (
        "Shoulder Stand",
        Precautions {
            guidance: &[
                "Support the back with both hands throughout",
                "Keep the neck neutral; never turn the head in the pose",
                "Pad the shoulders with a folded blanket",
            ],
            contraindications: &[
                "Avoid with cervical spine problems",
                "Avoid with high blood pressure or thyroid disorders",
            ],
        },
    ),
    (
        "Cobra Pose",
        Precautions {
            guidance: &[
                "Lift with the back muscles, pressing the hands lightly",
                "Keep the elbows close to the body",
                "Stop at a comfortable height; the navel may stay down",
            ],
            contraindications: &[
                "Avoid with herniated discs or recent back surgery",
                "Avoid during pregnancy",
            ],
        },
    ),
    (
        "Wheel Pose",
        Precautions {
            guidance: &[
                "Warm up the spine and shoulders thoroughly first",
                "Push up from the crown of the head in stages",
                "Keep the feet parallel to protect the lower back",
            ],
            contraindications: &[
                "Avoid with back, shoulder or wrist injuries",
                "Avoid with heart conditions or high blood pressure",
            ],
        },
    ),
    (
        "Camel Pose",
        Precautions {
            guidance: &[
                "Keep the hips stacked over the knees",
                "Support the lower back with the hands if the heels are far",
                "Come up leading with the chest, not the head",
            ],
            contraindications: &[
                "Avoid with serious lower back or neck injury",
                "Avoid with untreated high or low blood pressure",
            ],
        },
    ),
    (
        "Child's Pose",
        Precautions {
            guidance: &[
                "Rest the forehead on a block if it doesn't reach the floor",
                "Widen the knees to make room for the torso",
            ],
            contraindications: &[
                "Avoid with acute knee injuries",
                "Take a reclined rest instead in late pregnancy",
            ],
        },
    ),
    (
        "Triangle Pose",
        Precautions {
            guidance: &[
                "Shorten the stance rather than overreaching",
                "Rest the lower hand on the shin or a block",
                "Keep both sides of the waist long",
            ],
            contraindications: &[
                "Avoid with acute neck pain; look down instead of up",
                "Practice against a wall if balance is unreliable",
            ],
        },
    ),
    (
        "Lotus Pose",
        Precautions {
            guidance: &[
                "Open the hips with easier seated poses first",
                "Bring the foot to the opposite hip with the hands, never force",
                "Sit on a cushion to lift the hips above the knees",
            ],
            contraindications: &[
                "Avoid with knee or ankle injuries",
                "Use half lotus or easy pose while the hips are tight",
            ],
        },
    ),
];

/// Looks up the precaution text for a pose name (exact match).
///
/// # Examples
///
/// ```
/// use postura::precautions::for_pose;
///
/// let p = for_pose("Tree Pose").expect("known pose");
/// assert!(!p.guidance.is_empty());
/// assert!(for_pose("Unknown Pose").is_none());
/// ```
#[must_use]
pub fn for_pose(pose: &str) -> Option<Precautions> {
    POSE_PRECAUTIONS
        .iter()
        .find(|(name, _)| *name == pose)
        .map(|(_, p)| *p)
}

/// Returns the pose names in the table, in table order.
#[must_use]
pub fn known_poses() -> Vec<&'static str> {
    POSE_PRECAUTIONS.iter().map(|(name, _)| *name).collect()
}
