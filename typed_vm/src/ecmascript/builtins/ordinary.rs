// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::{
    abstract_operations::{
        operations_on_objects::{call_function, create_data_property, get},
        testing_and_comparison::same_value,
    },
    builtins::ArgumentsList,
    execution::{Agent, JsResult, ProtoIntrinsics},
    types::{
        InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyDescriptor, PropertyEntry,
        PropertyKey, Value,
    },
};

/// ### [10.1.5.1 OrdinaryGetOwnProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinarygetownproperty)
pub fn ordinary_get_own_property(
    agent: &Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. If O does not have an own property with key P, return undefined.
    // 2.-9. Let D be a newly created Property Descriptor with the attributes
    //       of X.
    agent[object]
        .properties
        .get(property_key)
        .map(|entry| entry.to_descriptor())
}

/// ### [10.1.6.1 OrdinaryDefineOwnProperty ( O, P, Desc )](https://tc39.es/ecma262/#sec-ordinarydefineownproperty)
pub fn ordinary_define_own_property(
    agent: &mut Agent,
    object: OrdinaryObject,
    property_key: PropertyKey,
    descriptor: PropertyDescriptor,
) -> bool {
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    let current = ordinary_get_own_property(agent, object, property_key);

    // 2. Let extensible be ? IsExtensible(O).
    let extensible = object.internal_extensible(agent);

    // 3. Return ValidateAndApplyPropertyDescriptor(O, P, extensible, Desc, current).
    validate_and_apply_property_descriptor(
        agent,
        Some(object),
        property_key,
        extensible,
        descriptor,
        current,
    )
}

/// ### [10.1.6.2 IsCompatiblePropertyDescriptor ( Extensible, Desc, Current )](https://tc39.es/ecma262/#sec-iscompatiblepropertydescriptor)
pub(crate) fn is_compatible_property_descriptor(
    agent: &mut Agent,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 1. Return ValidateAndApplyPropertyDescriptor(undefined, "", Extensible, Desc, Current).
    let property_key = PropertyKey::from_str(agent, "");
    validate_and_apply_property_descriptor(
        agent,
        None,
        property_key,
        extensible,
        descriptor,
        current,
    )
}

/// ### [10.1.6.3 ValidateAndApplyPropertyDescriptor ( O, P, extensible, Desc, current )](https://tc39.es/ecma262/#sec-validateandapplypropertydescriptor)
fn validate_and_apply_property_descriptor(
    agent: &mut Agent,
    o: Option<OrdinaryObject>,
    property_key: PropertyKey,
    extensible: bool,
    descriptor: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 2. If current is undefined, then
    let Some(current) = current else {
        // a. If extensible is false, return false.
        if !extensible {
            return false;
        }

        // b. If O is undefined, return true.
        let Some(o) = o else {
            return true;
        };

        // c. If IsAccessorDescriptor(Desc) is true, then
        //    i. Create an own accessor property named P of object O whose
        //       attributes are set to the value of the corresponding field in
        //       Desc if Desc has that field, or to the attribute's default
        //       value otherwise.
        // d. Else,
        //    i. Create an own data property named P of object O likewise.
        agent[o]
            .properties
            .set(property_key, PropertyEntry::from_descriptor(&descriptor));

        // e. Return true.
        return true;
    };

    // 4. If Desc does not have any fields, return true.
    if !descriptor.has_fields() {
        return true;
    }

    // 5. If current.[[Configurable]] is false, then
    if current.configurable == Some(false) {
        // a. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is true, return false.
        if descriptor.configurable == Some(true) {
            return false;
        }

        // b. If Desc has an [[Enumerable]] field and SameValue(Desc.[[Enumerable]],
        //    current.[[Enumerable]]) is false, return false.
        if descriptor.enumerable.is_some() && descriptor.enumerable != current.enumerable {
            return false;
        }

        // c. If IsGenericDescriptor(Desc) is false and
        //    SameValue(IsAccessorDescriptor(Desc), IsAccessorDescriptor(current))
        //    is false, return false.
        if !descriptor.is_generic_descriptor()
            && descriptor.is_accessor_descriptor() != current.is_accessor_descriptor()
        {
            return false;
        }

        // d. If IsAccessorDescriptor(current) is true, then
        if current.is_accessor_descriptor() {
            // i. If Desc has a [[Get]] field and SameValue(Desc.[[Get]],
            //    current.[[Get]]) is false, return false.
            if descriptor.get.is_some() && descriptor.get != current.get {
                return false;
            }
            // ii. If Desc has a [[Set]] field and SameValue(Desc.[[Set]],
            //     current.[[Set]]) is false, return false.
            if descriptor.set.is_some() && descriptor.set != current.set {
                return false;
            }
        }
        // e. Else if current.[[Writable]] is false, then
        else if current.writable == Some(false) {
            // i. If Desc has a [[Writable]] field and Desc.[[Writable]] is true, return false.
            if descriptor.writable == Some(true) {
                return false;
            }

            // ii. If Desc has a [[Value]] field and SameValue(Desc.[[Value]],
            //     current.[[Value]]) is false, return false.
            if let Some(value) = descriptor.value
                && !current
                    .value
                    .is_some_and(|current_value| same_value(value, current_value))
            {
                return false;
            }
        }
    }

    // 6. If O is not undefined, then
    if let Some(o) = o {
        let configurable = descriptor.configurable.or(current.configurable);
        let enumerable = descriptor.enumerable.or(current.enumerable);
        let replacement = if current.is_data_descriptor() && descriptor.is_accessor_descriptor()
        {
            // a. Replace the property named P of object O with an accessor
            //    property whose [[Configurable]] and [[Enumerable]] attributes
            //    are kept unless Desc has those fields.
            PropertyDescriptor {
                get: descriptor.get,
                set: descriptor.set,
                enumerable,
                configurable,
                ..Default::default()
            }
        } else if current.is_accessor_descriptor() && descriptor.is_data_descriptor() {
            // b. Replace the property named P of object O with a data property
            //    whose [[Configurable]] and [[Enumerable]] attributes are kept
            //    unless Desc has those fields.
            PropertyDescriptor {
                value: descriptor.value,
                writable: descriptor.writable,
                enumerable,
                configurable,
                ..Default::default()
            }
        } else {
            // c. For each field of Desc, set the corresponding attribute of
            //    the property named P of object O to the value of the field.
            PropertyDescriptor {
                value: descriptor.value.or(current.value),
                writable: descriptor.writable.or(current.writable),
                get: descriptor.get.or(current.get),
                set: descriptor.set.or(current.set),
                enumerable,
                configurable,
            }
        };
        agent[o]
            .properties
            .set(property_key, PropertyEntry::from_descriptor(&replacement));
    }

    // 7. Return true.
    true
}

/// ### [10.1.7.1 OrdinaryHasProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinaryhasproperty)
pub fn ordinary_has_property(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    let has_own = object.internal_get_own_property(agent, property_key)?;

    // 2. If hasOwn is not undefined, return true.
    if has_own.is_some() {
        return Ok(true);
    }

    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    let parent = object.internal_get_prototype_of(agent)?;

    // 4. If parent is not null, then
    if let Some(parent) = parent {
        // a. Return ? parent.[[HasProperty]](P).
        return parent.internal_has_property(agent, property_key);
    }

    // 5. Return false.
    Ok(false)
}

/// ### [10.1.8.1 OrdinaryGet ( O, P, Receiver )](https://tc39.es/ecma262/#sec-ordinaryget)
pub fn ordinary_get(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    let Some(descriptor) = object.internal_get_own_property(agent, property_key)? else {
        // 2. If desc is undefined, then
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let Some(parent) = object.internal_get_prototype_of(agent)? else {
            // b. If parent is null, return undefined.
            return Ok(Value::Undefined);
        };

        // c. Return ? parent.[[Get]](P, Receiver).
        return parent.internal_get(agent, property_key, receiver);
    };

    // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
    if let Some(value) = descriptor.value {
        debug_assert!(descriptor.is_data_descriptor());
        return Ok(value);
    }

    // 4. Assert: IsAccessorDescriptor(desc) is true.
    debug_assert!(descriptor.is_accessor_descriptor());

    // 5. Let getter be desc.[[Get]].
    // 6. If getter is undefined, return undefined.
    let Some(Some(getter)) = descriptor.get else {
        return Ok(Value::Undefined);
    };

    // 7. Return ? Call(getter, Receiver).
    call_function(agent, getter, receiver, None)
}

/// ### [10.1.9.1 OrdinarySet ( O, P, V, Receiver )](https://tc39.es/ecma262/#sec-ordinaryset)
pub fn ordinary_set(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    // 1. Let ownDesc be ? O.[[GetOwnProperty]](P).
    let own_descriptor = object.internal_get_own_property(agent, property_key)?;

    // 2. Return ? OrdinarySetWithOwnDescriptor(O, P, V, Receiver, ownDesc).
    ordinary_set_with_own_descriptor(agent, object, property_key, value, receiver, own_descriptor)
}

/// ### [10.1.9.2 OrdinarySetWithOwnDescriptor ( O, P, V, Receiver, ownDesc )](https://tc39.es/ecma262/#sec-ordinarysetwithowndescriptor)
pub(crate) fn ordinary_set_with_own_descriptor(
    agent: &mut Agent,
    object: Object,
    property_key: PropertyKey,
    value: Value,
    receiver: Value,
    own_descriptor: Option<PropertyDescriptor>,
) -> JsResult<bool> {
    let own_descriptor = if let Some(own_descriptor) = own_descriptor {
        own_descriptor
    } else {
        // 1. If ownDesc is undefined, then
        // a. Let parent be ? O.[[GetPrototypeOf]]().
        let parent = object.internal_get_prototype_of(agent)?;

        // b. If parent is not null, then
        if let Some(parent) = parent {
            // i. Return ? parent.[[Set]](P, V, Receiver).
            return parent.internal_set(agent, property_key, value, receiver);
        }
        // c. Else,
        // i. Set ownDesc to the PropertyDescriptor { [[Value]]: undefined,
        //    [[Writable]]: true, [[Enumerable]]: true, [[Configurable]]: true }.
        PropertyDescriptor {
            value: Some(Value::Undefined),
            writable: Some(true),
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        }
    };

    // 2. If IsDataDescriptor(ownDesc) is true, then
    if own_descriptor.is_data_descriptor() {
        // a. If ownDesc.[[Writable]] is false, return false.
        if own_descriptor.writable == Some(false) {
            return Ok(false);
        }

        // b. If Receiver is not an Object, return false.
        let Ok(receiver) = Object::try_from(receiver) else {
            return Ok(false);
        };

        // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
        let existing_descriptor = receiver.internal_get_own_property(agent, property_key)?;

        // d. If existingDescriptor is not undefined, then
        if let Some(existing_descriptor) = existing_descriptor {
            // i. If IsAccessorDescriptor(existingDescriptor) is true, return false.
            if existing_descriptor.is_accessor_descriptor() {
                return Ok(false);
            }

            // ii. If existingDescriptor.[[Writable]] is false, return false.
            if existing_descriptor.writable == Some(false) {
                return Ok(false);
            }

            // iii. Let valueDesc be the PropertyDescriptor { [[Value]]: V }.
            let value_descriptor = PropertyDescriptor {
                value: Some(value),
                ..Default::default()
            };

            // iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
            return receiver.internal_define_own_property(agent, property_key, value_descriptor);
        }

        // e. Else,
        // i. Assert: Receiver does not currently have a property P.
        // ii. Return ? CreateDataProperty(Receiver, P, V).
        return create_data_property(agent, receiver, property_key, value);
    }

    // 3. Assert: IsAccessorDescriptor(ownDesc) is true.
    debug_assert!(own_descriptor.is_accessor_descriptor());

    // 4. Let setter be ownDesc.[[Set]].
    // 5. If setter is undefined, return false.
    let Some(Some(setter)) = own_descriptor.set else {
        return Ok(false);
    };

    // 6. Perform ? Call(setter, Receiver, « V »).
    call_function(agent, setter, receiver, Some(ArgumentsList(&[value])))?;

    // 7. Return true.
    Ok(true)
}

/// ### [10.1.10.1 OrdinaryDelete ( O, P )](https://tc39.es/ecma262/#sec-ordinarydelete)
pub fn ordinary_delete(agent: &mut Agent, object: OrdinaryObject, property_key: PropertyKey) -> bool {
    // 1. Let desc be ? O.[[GetOwnProperty]](P).
    // 2. If desc is undefined, return true.
    let Some(entry) = agent[object].properties.get(property_key) else {
        return true;
    };

    // 3. If desc.[[Configurable]] is true, then
    if entry.configurable() {
        // a. Remove the own property with name P from O.
        agent[object].properties.remove(property_key);

        // b. Return true.
        return true;
    }

    // 4. Return false.
    false
}

/// ### [10.1.11.1 OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
pub fn ordinary_own_property_keys(agent: &Agent, object: OrdinaryObject) -> Vec<PropertyKey> {
    agent[object].properties.keys()
}

/// ### [10.1.12 OrdinaryObjectCreate ( proto \[ , additionalInternalSlotsList \] )](https://tc39.es/ecma262/#sec-ordinaryobjectcreate)
///
/// Creates an ordinary object whose `[[Prototype]]` is the named intrinsic,
/// or null when no intrinsic is given.
pub fn ordinary_object_create_with_intrinsics(
    agent: &mut Agent,
    proto_intrinsics: Option<ProtoIntrinsics>,
) -> OrdinaryObject {
    let prototype = proto_intrinsics.map(|proto_intrinsics| {
        agent
            .current_realm()
            .intrinsics()
            .get_intrinsic_default_proto(proto_intrinsics)
    });
    agent.heap.create_object_with_prototype(prototype)
}

/// ### [10.1.14 GetPrototypeFromConstructor ( constructor, intrinsicDefaultProto )](https://tc39.es/ecma262/#sec-getprototypefromconstructor)
///
/// Returns `None` when the intrinsic default prototype should be used,
/// which lets exotic objects skip creating a backing object.
pub(crate) fn get_prototype_from_constructor(
    agent: &mut Agent,
    constructor: Object,
    intrinsic_default_proto: ProtoIntrinsics,
) -> JsResult<Option<Object>> {
    // 2. Let proto be ? Get(constructor, "prototype").
    let prototype_key = PropertyKey::from_str(agent, "prototype");
    let proto = get(agent, constructor, prototype_key)?;
    match Object::try_from(proto) {
        // 3. If proto is not an Object, then
        //    a. Let realm be ? GetFunctionRealm(constructor).
        //    b. Set proto to realm's intrinsic object named intrinsicDefaultProto.
        Err(_) => Ok(None),
        // 4. Return proto.
        Ok(proto) => {
            let default_proto = agent
                .current_realm()
                .intrinsics()
                .get_intrinsic_default_proto(intrinsic_default_proto);
            Ok((proto != default_proto).then_some(proto))
        }
    }
}
