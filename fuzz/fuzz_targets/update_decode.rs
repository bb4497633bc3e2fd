#![no_main]

use std::collections::HashMap;
use std::sync::Arc;

use codec::{decode_update, CodecLimits, ObjectId, ObjectState, ObjectTable};
use libfuzzer_sys::fuzz_target;
use schema::{ClassDescriptor, ClassId, FieldDescriptor, ParamType};

struct FuzzTable {
    classes: HashMap<ObjectId, Arc<ClassDescriptor>>,
}

impl ObjectTable for FuzzTable {
    fn class_of(&self, id: ObjectId) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(&id)
    }

    fn state_mut(&mut self, _id: ObjectId) -> Option<&mut dyn ObjectState> {
        None
    }
}

fn fuzz_class() -> Arc<ClassDescriptor> {
    Arc::new(
        ClassDescriptor::new(ClassId::new(1), "Fuzz")
            .field(FieldDescriptor::parameter("flag", ParamType::Bool))
            .field(FieldDescriptor::parameter("count", ParamType::U16))
            .field(FieldDescriptor::method("ping"))
            .field(FieldDescriptor::parameter("label", ParamType::str(32)))
            .field(FieldDescriptor::parameter("pos", ParamType::Vec3)),
    )
}

fuzz_target!(|data: &[u8]| {
    let class = fuzz_class();
    let mut classes = HashMap::new();
    // A handful of known object ids; everything else must be rejected.
    for id in 0..4u32 {
        classes.insert(ObjectId::new(id), Arc::clone(&class));
    }
    let table = FuzzTable { classes };

    // Decoding arbitrary bytes must never panic, only error.
    let _ = decode_update(
        data,
        &table,
        &wire::Limits::for_testing(),
        &CodecLimits::for_testing(),
    );
});
